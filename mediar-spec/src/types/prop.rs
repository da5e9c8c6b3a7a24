//! Leaf property schemas.
//!
//! A leaf property describes one scalar configuration or payload value. It
//! comes in two wire forms: a bare tag shorthand (`"string"`, `"binary"`,
//! `"number"`, `"boolean"`) meaning "required, no bounds", and a typed
//! object form tagged by `type` carrying bounds, `required`, and `default`.
//!
//! A field with a `default` need not be supplied by a caller; a field that
//! is `required` and has no `default` must always be supplied. Declaring
//! both `required` and `default` on one field is contradictory and is
//! rejected at schema-check time (`mediar-core`).

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Scalar tags usable as shorthand property schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarTag {
    String,
    Binary,
    Number,
    Boolean,
}

impl ScalarTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Binary => "binary",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Free-form string property with optional inclusive length bounds
/// (measured in characters).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringProp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// Numeric property with optional inclusive bounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberProp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Boolean property.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BooleanProp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// Binary property with optional inclusive length bounds (measured in
/// bytes).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BinaryProp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
}

/// String-union property: the value must be one of the listed literals.
///
/// `of` order is preserved: membership checks ignore it, but generated help
/// text lists choices in declaration order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringUnionProp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub of: Vec<String>,
}

impl StringUnionProp {
    /// Union over the given literals, in order.
    pub fn of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            of: values.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Typed property schema, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypedProp {
    String(StringProp),
    Number(NumberProp),
    Boolean(BooleanProp),
    Binary(BinaryProp),
    StringUnion(StringUnionProp),
}

impl TypedProp {
    pub const fn tag(&self) -> ScalarTag {
        match self {
            Self::String(_) | Self::StringUnion(_) => ScalarTag::String,
            Self::Number(_) => ScalarTag::Number,
            Self::Boolean(_) => ScalarTag::Boolean,
            Self::Binary(_) => ScalarTag::Binary,
        }
    }

    pub const fn required(&self) -> bool {
        match self {
            Self::String(p) => p.required,
            Self::Number(p) => p.required,
            Self::Boolean(p) => p.required,
            Self::Binary(p) => p.required,
            Self::StringUnion(p) => p.required,
        }
    }

    pub const fn has_default(&self) -> bool {
        match self {
            Self::String(p) => p.default.is_some(),
            Self::Number(p) => p.default.is_some(),
            Self::Boolean(p) => p.default.is_some(),
            Self::Binary(p) => p.default.is_some(),
            Self::StringUnion(p) => p.default.is_some(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::String(p) => p.description.as_deref(),
            Self::Number(p) => p.description.as_deref(),
            Self::Boolean(p) => p.description.as_deref(),
            Self::Binary(p) => p.description.as_deref(),
            Self::StringUnion(p) => p.description.as_deref(),
        }
    }
}

/// A leaf property schema: bare scalar tag shorthand or typed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropSchema {
    Shorthand(ScalarTag),
    Typed(TypedProp),
}

impl PropSchema {
    /// Shorthand fields are always required; typed fields carry the flag.
    pub const fn required(&self) -> bool {
        match self {
            Self::Shorthand(_) => true,
            Self::Typed(typed) => typed.required(),
        }
    }

    pub const fn has_default(&self) -> bool {
        match self {
            Self::Shorthand(_) => false,
            Self::Typed(typed) => typed.has_default(),
        }
    }

    pub const fn tag(&self) -> ScalarTag {
        match self {
            Self::Shorthand(tag) => *tag,
            Self::Typed(typed) => typed.tag(),
        }
    }
}

impl From<ScalarTag> for PropSchema {
    fn from(tag: ScalarTag) -> Self {
        Self::Shorthand(tag)
    }
}

impl From<TypedProp> for PropSchema {
    fn from(typed: TypedProp) -> Self {
        Self::Typed(typed)
    }
}

impl From<StringProp> for PropSchema {
    fn from(p: StringProp) -> Self {
        Self::Typed(TypedProp::String(p))
    }
}

impl From<NumberProp> for PropSchema {
    fn from(p: NumberProp) -> Self {
        Self::Typed(TypedProp::Number(p))
    }
}

impl From<BooleanProp> for PropSchema {
    fn from(p: BooleanProp) -> Self {
        Self::Typed(TypedProp::Boolean(p))
    }
}

impl From<BinaryProp> for PropSchema {
    fn from(p: BinaryProp) -> Self {
        Self::Typed(TypedProp::Binary(p))
    }
}

impl From<StringUnionProp> for PropSchema {
    fn from(p: StringUnionProp) -> Self {
        Self::Typed(TypedProp::StringUnion(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_roundtrip() {
        let json = serde_json::to_string(&PropSchema::Shorthand(ScalarTag::Binary)).unwrap();
        assert_eq!(json, "\"binary\"");
        let de: PropSchema = serde_json::from_str(&json).unwrap();
        assert!(de.required());
        assert_eq!(de.tag(), ScalarTag::Binary);
    }

    #[test]
    fn typed_roundtrip_keeps_tag_and_bounds() {
        let prop: PropSchema = NumberProp {
            description: Some("sampling temperature".into()),
            min: Some(0.0),
            max: Some(1.0),
            ..Default::default()
        }
        .into();

        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["min"], 0.0);
        assert!(json.get("required").is_none(), "false flag stays off-wire");

        let de: PropSchema = serde_json::from_value(json).unwrap();
        assert_eq!(de, prop);
    }

    #[test]
    fn string_union_preserves_of_order() {
        let prop = StringUnionProp::of(["b", "a", "c"]);
        let json = serde_json::to_value(&prop).unwrap();
        let listed: Vec<_> = json["of"].as_array().unwrap().iter().collect();
        assert_eq!(listed[0], "b");
        assert_eq!(listed[1], "a");
        assert_eq!(listed[2], "c");
    }

    #[test]
    fn untagged_prefers_shorthand_for_bare_strings() {
        let de: PropSchema = serde_json::from_str("\"string\"").unwrap();
        assert_eq!(de, PropSchema::Shorthand(ScalarTag::String));

        let de: PropSchema =
            serde_json::from_str(r#"{"type":"string","maxLength":12}"#).unwrap();
        assert!(matches!(
            de,
            PropSchema::Typed(TypedProp::String(StringProp {
                max_length: Some(12),
                ..
            }))
        ));
    }
}
