use regex::Regex;

use crate::error::ConstructionError;

/// A compiled pattern that must match the whole string.
///
/// The source is kept as written for error messages; matching runs against
/// an anchored copy so `abc` does not accept `xabcx`.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    anchored: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        // Compile the raw source first so errors point at what the caller wrote.
        Regex::new(source)?;
        // A trailing `(?x)` comment swallows the closing `)$` and leaves the
        // group unclosed; end the comment's line first. The newline is only
        // reached in that case, where verbose mode makes it whitespace.
        let anchored = Regex::new(&format!("^(?:{source})$"))
            .or_else(|_| Regex::new(&format!("^(?:{source}\n)$")))?;
        Ok(Self { source: source.to_string(), anchored })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, s: &str) -> bool {
        self.anchored.is_match(s)
    }
}

#[derive(Clone, Debug, Default)]
pub struct StrRules {
    pub pattern: Option<Pattern>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl StrRules {
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none() && self.min_length.is_none() && self.max_length.is_none()
    }

    /// Pattern first, then length. Length counts Unicode scalar values.
    pub(crate) fn check(&self, field: &str, s: &str) -> Result<(), ConstructionError> {
        if let Some(pattern) = &self.pattern {
            if !pattern.is_full_match(s) {
                return Err(ConstructionError::Pattern {
                    field: field.to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
        }

        let length = s.chars().count();
        let too_short = self.min_length.is_some_and(|min| length < min);
        let too_long = self.max_length.is_some_and(|max| length > max);
        if too_short || too_long {
            return Err(ConstructionError::Length {
                field: field.to_string(),
                length,
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }
}
