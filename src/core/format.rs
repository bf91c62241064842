use std::fmt;

use clap::ValueEnum;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use crate::core::value::Value;

const JSON_INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Json => Self::Yaml,
            Self::Yaml => Self::Json,
        }
    }

    /// Guesses the format from a file name or URL; JSON unless it ends in
    /// `.yaml` or `.yml`.
    pub fn from_location(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        let lower = lower.split(['?', '#']).next().unwrap_or_default();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::Yaml
        } else {
            Self::Json
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("invalid {format}: {message}")]
    Parse {
        format: DocumentFormat,
        message: String,
    },
}

impl FormatError {
    fn parse(format: DocumentFormat, err: impl fmt::Display) -> Self {
        Self::Parse {
            format,
            message: err.to_string(),
        }
    }

    /// The underlying parser message, without the format prefix.
    pub fn detail(&self) -> &str {
        match self {
            Self::Parse { message, .. } => message.as_str(),
        }
    }
}

pub fn serialize(document: &Value, format: DocumentFormat) -> String {
    match format {
        DocumentFormat::Json => to_pretty_json(document),
        DocumentFormat::Yaml => serde_yaml::to_string(document).unwrap_or_else(|err| {
            tracing::error!(%err, "yaml serialization failed");
            String::new()
        }),
    }
}

pub fn deserialize(text: &str, format: DocumentFormat) -> Result<Value, FormatError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(text).map_err(|err| FormatError::parse(format, err))
        }
        DocumentFormat::Yaml => {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_yaml::from_str::<Value>(text).map_err(|err| FormatError::parse(format, err))
        }
    }
}

fn to_pretty_json(document: &Value) -> String {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    if let Err(err) = document.serialize(&mut serializer) {
        tracing::error!(%err, "json serialization failed");
        return String::new();
    }
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{DocumentFormat, FormatError, deserialize, serialize};
    use crate::core::value::Value;
    use serde_json::json;

    fn sample() -> Value {
        Value::from(json!({
            "name": "Ada",
            "age": 36,
            "ratio": 0.25,
            "active": true,
            "nothing": null,
            "tags": ["a", "b"],
            "nested": {"list": [{"x": 1}, []]}
        }))
    }

    #[test]
    fn json_uses_four_space_indent() {
        let doc = Value::from(json!({"a": {"b": 1}}));
        assert_eq!(
            serialize(&doc, DocumentFormat::Json),
            "{\n    \"a\": {\n        \"b\": 1\n    }\n}"
        );
    }

    #[test]
    fn json_round_trip_is_exact() {
        let doc = sample();
        let text = serialize(&doc, DocumentFormat::Json);
        assert_eq!(deserialize(&text, DocumentFormat::Json), Ok(doc));
    }

    #[test]
    fn yaml_round_trip_for_plain_values() {
        let doc = sample();
        let text = serialize(&doc, DocumentFormat::Yaml);
        assert!(text.contains("name: Ada"));
        assert_eq!(deserialize(&text, DocumentFormat::Yaml), Ok(doc));
    }

    #[test]
    fn json_keeps_key_order() {
        let text = r#"{"z": 1, "a": 2}"#;
        let doc = deserialize(text, DocumentFormat::Json).expect("parse");
        assert_eq!(
            serialize(&doc, DocumentFormat::Json),
            "{\n    \"z\": 1,\n    \"a\": 2\n}"
        );
    }

    #[test]
    fn nan_serializes_as_null() {
        let doc = Value::from(json!({"n": 1}));
        let Value::Object(mut map) = doc else {
            panic!("expected object");
        };
        map.insert("n".to_string(), Value::Number(f64::NAN));
        let text = serialize(&Value::Object(map), DocumentFormat::Json);
        assert_eq!(text, "{\n    \"n\": null\n}");
    }

    #[test]
    fn parse_error_names_the_format() {
        let err = deserialize("{\"a\": ", DocumentFormat::Json).expect_err("must fail");
        let FormatError::Parse { format, .. } = &err;
        assert_eq!(*format, DocumentFormat::Json);
        assert!(err.to_string().starts_with("invalid JSON: "));
        assert!(!err.detail().is_empty());
    }

    #[test]
    fn yaml_numeric_keys_become_text() {
        let doc = deserialize("1: one\ntrue: yes\n", DocumentFormat::Yaml).expect("parse");
        assert_eq!(doc, Value::from(json!({"1": "one", "true": "yes"})));
    }

    #[test]
    fn format_guess_from_location() {
        assert_eq!(DocumentFormat::from_location("conf/app.YML"), DocumentFormat::Yaml);
        assert_eq!(
            DocumentFormat::from_location("https://host/data.yaml?raw=1"),
            DocumentFormat::Yaml
        );
        assert_eq!(DocumentFormat::from_location("data.json"), DocumentFormat::Json);
    }
}
