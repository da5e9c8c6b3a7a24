//! Connector schemas.
//!
//! The top-level declaration a connector author ships: an id, the secret
//! key names the vendor needs, the options schema, and the supported IO.
//! Plain data only; the vendor client implementing it is registered
//! separately (`mediar-registry`).

use serde::{Deserialize, Serialize};

use super::io::TransformationIo;
use super::options::OptionsSchema;
use super::unit::ObjectUnitSchema;

/// One named secret the connector needs at call time. Values are sourced
/// out of band (environment, keychain) and referenced by name only; no
/// secret value ever appears in schema data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySchema {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl KeySchema {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A vendor connector declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSchema {
    /// Unique connector id; becomes a token in derived call paths.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub keys: Vec<KeySchema>,
    pub options: OptionsSchema,
    #[serde(rename = "supportedIO")]
    pub supported_io: Vec<TransformationIo>,
}

impl ConnectorSchema {
    pub fn new(id: impl Into<String>, options: OptionsSchema) -> Self {
        Self {
            id: id.into(),
            description: None,
            keys: Vec::new(),
            options,
            supported_io: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_key(mut self, key: KeySchema) -> Self {
        self.keys.push(key);
        self
    }

    pub fn with_io(mut self, io: TransformationIo) -> Self {
        self.supported_io.push(io);
        self
    }

    /// Every object unit mentioned anywhere in the supported IO, in
    /// declaration order. Primitive units carry no identity and are
    /// skipped.
    pub fn object_units(&self) -> impl Iterator<Item = &ObjectUnitSchema> {
        self.supported_io
            .iter()
            .flat_map(|io| io.io.values())
            .flatten()
            .flat_map(|pair| [pair.input(), pair.output()])
            .filter_map(|side| side.unit().as_object())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::io::{IoPair, IoUnitSchema, TransferMethod, Transformation};
    use crate::types::unit::{ObjectUnitSchema, PayloadKind};

    fn sample() -> ConnectorSchema {
        let chat = ObjectUnitSchema::new("chatMessage", PayloadKind::String);
        ConnectorSchema::new("acme", OptionsSchema::new(["acme-1"]))
            .with_description("chat adapter for ACME models")
            .with_key(KeySchema::new("ACME_API_KEY").with_description("vendor console"))
            .with_io(
                TransformationIo::new(Transformation::TextToText)
                    .with(
                        TransferMethod::StaticInStaticOut,
                        vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
                    )
                    .with(
                        TransferMethod::StaticInStreamOut,
                        vec![IoPair::new(
                            IoUnitSchema::batch(chat),
                            PayloadKind::String,
                        )],
                    ),
            )
    }

    #[test]
    fn wire_format_uses_supported_io_key() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "acme");
        assert_eq!(json["keys"][0]["key"], "ACME_API_KEY");
        assert!(json.get("supportedIO").is_some());
        assert!(json.get("supported_io").is_none());
    }

    #[test]
    fn connector_roundtrip() {
        let schema = sample();
        let json = serde_json::to_string(&schema).unwrap();
        let de: ConnectorSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(de, schema);
    }

    #[test]
    fn object_units_skips_primitives() {
        let ids: Vec<_> = sample().object_units().filter_map(|u| u.id()).collect();
        assert_eq!(ids, ["chatMessage"]);
    }
}
