//! Unit schemas.
//!
//! A unit is one message shape usable as transformation input or output:
//! either a *primitive* unit (the whole message is a bare `string` or
//! `binary` scalar) or an *object* unit carrying a `unitId` identity, a
//! `payload` field, and arbitrary typed metadata fields.
//!
//! The `unitId` literal is the unit's identity token and feeds signature
//! key generation: one literal must always denote one structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::prop::{PropSchema, StringUnionProp, TypedProp};

/// Payload kind of a unit: the scalar type the message body carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadKind {
    String,
    Binary,
}

impl PayloadKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Binary => "binary",
        }
    }
}

/// Structured unit: identity, payload kind, and typed metadata fields.
///
/// On the wire the metadata fields sit flat beside `unitId` and `payload`,
/// exactly as connector authors write them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectUnitSchema {
    /// Identity of this unit: a required string union over exactly one
    /// literal. Checked at load time, not by construction.
    pub unit_id: TypedProp,
    pub payload: PayloadKind,
    #[serde(flatten)]
    pub fields: BTreeMap<String, PropSchema>,
}

impl ObjectUnitSchema {
    /// A unit with the given identity literal and payload kind, no
    /// metadata fields yet.
    pub fn new(id: impl Into<String>, payload: PayloadKind) -> Self {
        Self {
            unit_id: TypedProp::StringUnion(StringUnionProp::of([id.into()]).required()),
            payload,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, prop: impl Into<PropSchema>) -> Self {
        self.fields.insert(name.into(), prop.into());
        self
    }

    /// The `unitId` literal, when the schema is well formed.
    pub fn id(&self) -> Option<&str> {
        match &self.unit_id {
            TypedProp::StringUnion(union) if union.of.len() == 1 => {
                Some(union.of[0].as_str())
            }
            _ => None,
        }
    }
}

/// One message shape: a bare payload scalar or a structured object unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnitSchema {
    Payload(PayloadKind),
    Object(Box<ObjectUnitSchema>),
}

impl UnitSchema {
    /// The scalar type of this unit's message body.
    pub fn payload_kind(&self) -> PayloadKind {
        match self {
            Self::Payload(kind) => *kind,
            Self::Object(unit) => unit.payload,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectUnitSchema> {
        match self {
            Self::Payload(_) => None,
            Self::Object(unit) => Some(unit),
        }
    }
}

impl From<PayloadKind> for UnitSchema {
    fn from(kind: PayloadKind) -> Self {
        Self::Payload(kind)
    }
}

impl From<ObjectUnitSchema> for UnitSchema {
    fn from(unit: ObjectUnitSchema) -> Self {
        Self::Object(Box::new(unit))
    }
}
