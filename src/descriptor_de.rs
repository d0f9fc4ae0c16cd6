//! Loading field descriptors from JSON.
//!
//! The document is an array of descriptor objects using the same keys as the
//! builder (`name`, `type`, `regex`, `minLength`, `maxLength`, `minValue`,
//! `maxValue`, `defaultValue`, `optional`). Errors carry the JSON path of the
//! offending node.
use serde::de::DeserializeOwned;

use crate::error::DefinitionError;
use crate::field::FieldDescriptor;

pub fn descriptors_from_str(src: &str) -> Result<Vec<FieldDescriptor>, DefinitionError> {
    read_all(serde_json::Deserializer::from_str(src))
}

pub fn descriptors_from_slice(bytes: &[u8]) -> Result<Vec<FieldDescriptor>, DefinitionError> {
    read_all(serde_json::Deserializer::from_slice(bytes))
}

fn read_all<'de, R>(mut de: serde_json::Deserializer<R>) -> Result<Vec<FieldDescriptor>, DefinitionError>
where
    R: serde_json::de::Read<'de>,
{
    let out = with_path(&mut de)?;
    // trailing input after the array
    de.end().map_err(|err| DefinitionError::Descriptor {
        path: ".".to_string(),
        message: err.to_string(),
    })?;
    Ok(out)
}

fn with_path<'de, D, T>(de: D) -> Result<T, DefinitionError>
where
    D: serde::Deserializer<'de, Error = serde_json::Error>,
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| DefinitionError::Descriptor {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::DefaultValue;
    use crate::kind::Kind;
    use serde_json::json;

    #[test]
    fn reads_camel_case_descriptors() {
        let src = r#"[
            {"name": "username", "type": "string", "regex": "^[^@]+$", "maxLength": 64},
            {"name": "domain", "type": "string", "defaultValue": "example.com"},
            {"name": "age", "type": "number", "minValue": 0, "maxValue": 150, "optional": true}
        ]"#;
        let ds = descriptors_from_str(src).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds[0].pattern.as_deref(), Some("^[^@]+$"));
        assert_eq!(ds[0].max_length, Some(64));
        assert!(matches!(&ds[1].default_value, Some(DefaultValue::Literal(v)) if *v == json!("example.com")));
        assert_eq!(ds[2].kind, Some(Kind::Number));
        assert_eq!(ds[2].max_value, Some(150.0));
        assert!(ds[2].optional);
        assert!(!ds[0].optional);
    }

    #[test]
    fn explicit_null_default_is_a_literal() {
        let ds = descriptors_from_slice(br#"[{"defaultValue": null}]"#).unwrap();
        assert!(matches!(&ds[0].default_value, Some(DefaultValue::Literal(v)) if v.is_null()));
    }

    #[test]
    fn errors_point_at_the_bad_node() {
        let err = descriptors_from_str(r#"[{"name": "a"}, {"name": "b", "type": "function"}]"#).unwrap_err();
        match err {
            DefinitionError::Descriptor { path, .. } => assert_eq!(path, "[1].type"),
            other => panic!("unexpected error: {other}"),
        }

        let err = descriptors_from_str(r#"[{"nmae": "a"}]"#).unwrap_err();
        assert!(matches!(err, DefinitionError::Descriptor { .. }));

        let err = descriptors_from_str(r#"[] []"#).unwrap_err();
        assert!(matches!(err, DefinitionError::Descriptor { ref path, .. } if path == "."));
    }
}
