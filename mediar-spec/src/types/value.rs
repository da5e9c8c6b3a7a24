//! Runtime values flowing through registered calls.
//!
//! Schemas are static declarations; these are the dynamic values validated
//! against them at call time. Binary payloads use `bytes::Bytes` so large
//! bodies clone cheaply. Secret values use `secrecy::SecretString`: they
//! are redacted from `Debug` output and never serialized back out.

use std::collections::BTreeMap;

use bytes::Bytes;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::prop::ScalarTag;

/// Scalar runtime value matching a leaf property schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Number(f64),
    String(String),
    Binary(Bytes),
}

impl ScalarValue {
    /// The scalar tag this value satisfies (string unions included under
    /// `string`).
    pub const fn tag(&self) -> ScalarTag {
        match self {
            Self::Bool(_) => ScalarTag::Boolean,
            Self::Number(_) => ScalarTag::Number,
            Self::String(_) => ScalarTag::String,
            Self::Binary(_) => ScalarTag::Binary,
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Bytes> for ScalarValue {
    fn from(value: Bytes) -> Self {
        Self::Binary(value)
    }
}

/// One message value: bare payload scalar or structured object unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitValue {
    Text(String),
    Blob(Bytes),
    Object(BTreeMap<String, ScalarValue>),
}

impl UnitValue {
    /// An object unit value carrying its identity literal.
    pub fn object(unit_id: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("unitId".to_string(), ScalarValue::String(unit_id.into()));
        Self::Object(fields)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        if let Self::Object(fields) = &mut self {
            fields.insert(name.into(), value.into());
        }
        self
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, ScalarValue>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<&str> for UnitValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for UnitValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Bytes> for UnitValue {
    fn from(value: Bytes) -> Self {
        Self::Blob(value)
    }
}

/// Materialized options for one call, after default filling.
pub type OptionsValue = BTreeMap<String, ScalarValue>;

/// Secret values keyed by the names a connector's `keys` schema declares.
pub type SecretMap = BTreeMap<String, SecretString>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tags() {
        assert_eq!(ScalarValue::from(true).tag(), ScalarTag::Boolean);
        assert_eq!(ScalarValue::from(0.5).tag(), ScalarTag::Number);
        assert_eq!(ScalarValue::from("x").tag(), ScalarTag::String);
        assert_eq!(
            ScalarValue::from(Bytes::from_static(b"\x00")).tag(),
            ScalarTag::Binary
        );
    }

    #[test]
    fn object_builder_carries_unit_id() {
        let value = UnitValue::object("chatMessage")
            .with("role", "user")
            .with("payload", "hello");
        let fields = value.as_object().unwrap();
        assert_eq!(
            fields.get("unitId"),
            Some(&ScalarValue::String("chatMessage".into()))
        );
        assert_eq!(
            fields.get("payload"),
            Some(&ScalarValue::String("hello".into()))
        );
    }

    #[test]
    fn unit_value_json_shapes() {
        let text: UnitValue = "hi".into();
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"hi\"");

        let object = UnitValue::object("chatMessage").with("payload", "hi");
        let json = serde_json::to_value(&object).unwrap();
        assert_eq!(json["unitId"], "chatMessage");
        assert_eq!(json["payload"], "hi");
    }
}
