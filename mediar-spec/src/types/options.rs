//! Options schemas.
//!
//! The named tunables of one connector, shared by every call it serves.
//! Exactly one member is mandatory: `model`, a required string union over
//! the selectable model identifiers. Everything else is connector-specific
//! (temperature, topP, voice, resolution, ...).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::prop::{PropSchema, StringUnionProp, TypedProp};

/// Tunable options for a connector's model calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionsSchema {
    /// Selectable model identifiers; always a required string union.
    pub model: TypedProp,
    #[serde(flatten)]
    pub extra: BTreeMap<String, PropSchema>,
}

impl OptionsSchema {
    /// An options schema selecting among the given model identifiers.
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            model: TypedProp::StringUnion(StringUnionProp::of(models).required()),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, prop: impl Into<PropSchema>) -> Self {
        self.extra.insert(name.into(), prop.into());
        self
    }

    /// All fields of the schema, `model` first.
    pub fn fields(&self) -> impl Iterator<Item = (&str, PropSchemaRef<'_>)> {
        std::iter::once(("model", PropSchemaRef::Typed(&self.model))).chain(
            self.extra
                .iter()
                .map(|(name, prop)| (name.as_str(), PropSchemaRef::Schema(prop))),
        )
    }
}

/// Borrowed view over either the dedicated `model` prop or a regular
/// schema member, so callers can walk all options uniformly.
#[derive(Debug, Clone, Copy)]
pub enum PropSchemaRef<'a> {
    Typed(&'a TypedProp),
    Schema(&'a PropSchema),
}

impl PropSchemaRef<'_> {
    pub fn required(&self) -> bool {
        match self {
            Self::Typed(typed) => typed.required(),
            Self::Schema(prop) => prop.required(),
        }
    }
}
