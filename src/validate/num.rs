use std::cmp::Ordering;

use serde_json::Number;

use crate::error::ConstructionError;

/// 2^64: no i64 or u64 reaches it in either direction.
const INT_SPAN: f64 = 18_446_744_073_709_551_616.0;

#[derive(Clone, Debug, Default)]
pub struct NumRules {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
}

impl NumRules {
    pub fn is_empty(&self) -> bool {
        self.min_value.is_none() && self.max_value.is_none()
    }

    /// Inclusive range check. Integers are compared exactly, never through
    /// a lossy f64 conversion; anything that cannot be ordered is rejected.
    pub(crate) fn check(&self, field: &str, n: &Number) -> Result<(), ConstructionError> {
        let within = |bound: Option<f64>, outside: Ordering| match bound {
            None => true,
            Some(b) => compare(n, b).is_some_and(|o| o != outside),
        };
        if within(self.min_value, Ordering::Less) && within(self.max_value, Ordering::Greater) {
            return Ok(());
        }
        Err(ConstructionError::Range {
            field: field.to_string(),
            value: n.clone(),
            min: self.min_value,
            max: self.max_value,
        })
    }
}

fn compare(n: &Number, bound: f64) -> Option<Ordering> {
    if let Some(i) = n.as_i64() {
        return compare_int(i128::from(i), bound);
    }
    if let Some(u) = n.as_u64() {
        return compare_int(i128::from(u), bound);
    }
    n.as_f64()?.partial_cmp(&bound)
}

fn compare_int(v: i128, bound: f64) -> Option<Ordering> {
    if !bound.is_finite() {
        return None;
    }
    if bound >= INT_SPAN {
        return Some(Ordering::Less);
    }
    if bound <= -INT_SPAN {
        return Some(Ordering::Greater);
    }
    // |floor| < 2^64, so the cast is exact.
    let floor = bound.floor();
    Some(match v.cmp(&(floor as i128)) {
        Ordering::Equal if bound > floor => Ordering::Less,
        o => o,
    })
}
