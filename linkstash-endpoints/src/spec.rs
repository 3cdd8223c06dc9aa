//! Per-parameter configuration records
//!
//! A [`ParamSpec`] describes one command-line parameter: its help text, the
//! coercion applied to raw input, the literal values it accepts, and how many
//! value tokens it consumes. Structural keys are typed fields; anything else
//! lands in the open options bag and is forwarded verbatim to the consumer's
//! registration call.

use indexmap::IndexMap;
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Value coercion applied to a parameter's raw textual input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Raw text, no coercion.
    String,
    /// Signed 64-bit integer.
    Integer,
    /// Presence flag; consumes no value token.
    Boolean,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Boolean => write!(f, "boolean"),
        }
    }
}

/// How many value tokens a parameter consumes.
///
/// Absent cardinality means exactly one token. The serialized form follows
/// the conventional nargs vocabulary: `"*"`, `"+"`, or a fixed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Zero or more tokens (`"*"`).
    ZeroOrMore,
    /// One or more tokens (`"+"`).
    OneOrMore,
    /// A fixed number of tokens.
    Exactly(usize),
}

impl Serialize for Cardinality {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cardinality::ZeroOrMore => serializer.serialize_str("*"),
            Cardinality::OneOrMore => serializer.serialize_str("+"),
            Cardinality::Exactly(count) => serializer.serialize_u64(*count as u64),
        }
    }
}

impl<'de> Deserialize<'de> for Cardinality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(usize),
            Tag(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(count) => Ok(Cardinality::Exactly(count)),
            Raw::Tag(tag) => match tag.as_str() {
                "*" => Ok(Cardinality::ZeroOrMore),
                "+" => Ok(Cardinality::OneOrMore),
                other => Err(D::Error::custom(format!(
                    "unknown cardinality '{other}', expected '*', '+', or a count"
                ))),
            },
        }
    }
}

/// Declarative configuration for one command-line parameter.
///
/// All fields are optional. Consumers decide positional vs. named placement;
/// the spec itself only carries validation and help annotations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Per-flag help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Coercion applied to raw input; absent means raw text.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,

    /// Allowed literal values, in display order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,

    /// Number of value tokens consumed; absent means exactly one.
    #[serde(rename = "nargs", default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,

    /// Open options bag: further annotation keys, forwarded verbatim.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl ParamSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the value coercion.
    pub fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Set the allowed literal values.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Set the cardinality.
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    /// Attach a non-structural annotation key.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cardinality_deserializes_conventional_forms() {
        let spec: ParamSpec = serde_json::from_value(json!({"nargs": "+"})).unwrap();
        assert_eq!(spec.cardinality, Some(Cardinality::OneOrMore));

        let spec: ParamSpec = serde_json::from_value(json!({"nargs": "*"})).unwrap();
        assert_eq!(spec.cardinality, Some(Cardinality::ZeroOrMore));

        let spec: ParamSpec = serde_json::from_value(json!({"nargs": 3})).unwrap();
        assert_eq!(spec.cardinality, Some(Cardinality::Exactly(3)));
    }

    #[test]
    fn cardinality_rejects_unknown_tag() {
        let result: Result<Cardinality, _> = serde_json::from_value(json!("?!"));
        assert!(result.is_err());
    }

    #[test]
    fn structural_keys_deserialize_into_typed_fields() {
        let spec: ParamSpec = serde_json::from_value(json!({
            "help": "First param",
            "type": "integer",
            "choices": ["a", "b", "c"],
        }))
        .unwrap();

        assert_eq!(spec.help.as_deref(), Some("First param"));
        assert_eq!(spec.value_type, Some(ValueType::Integer));
        assert_eq!(
            spec.choices,
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
        assert!(spec.extra.is_empty());
    }

    #[test]
    fn unrecognized_keys_land_in_the_options_bag() {
        let spec: ParamSpec = serde_json::from_value(json!({
            "help": "A param",
            "default": "all",
            "value-name": "COUNT",
        }))
        .unwrap();

        assert_eq!(spec.extra.get("default"), Some(&json!("all")));
        assert_eq!(spec.extra.get("value-name"), Some(&json!("COUNT")));
        assert_eq!(spec.extra.len(), 2);
    }

    #[test]
    fn builder_methods_compose() {
        let spec = ParamSpec::new()
            .with_help("Second param")
            .with_choices(["a", "b", "c"])
            .with_cardinality(Cardinality::OneOrMore);

        assert_eq!(spec.help.as_deref(), Some("Second param"));
        assert_eq!(spec.cardinality, Some(Cardinality::OneOrMore));
        assert!(spec.value_type.is_none());
    }
}
