//! Call shapes and the derived signature table.

use std::collections::BTreeMap;

use mediar_spec::MediarError;
use mediar_spec::types::{ConnectorSchema, IoPair, TransferMethod};

use crate::streaming::IoValue;

use super::key::{SignatureKey, UnitKind, side_key};

/// Arity of one side of a call: which unit, batched or not, streamed or
/// not. Batch and stream wrapping compose independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueShape {
    pub unit: UnitKind,
    pub batch: bool,
    pub streamed: bool,
}

impl ValueShape {
    /// Whether a runtime payload has this shape's arity. Unit *content* is
    /// the validator's job; this checks only the batch/stream wrapping.
    pub const fn accepts(&self, value: &IoValue) -> bool {
        match value {
            IoValue::Unit(_) => !self.batch && !self.streamed,
            IoValue::Batch(_) => self.batch && !self.streamed,
            IoValue::Stream(_) => !self.batch && self.streamed,
            IoValue::BatchStream(_) => self.batch && self.streamed,
        }
    }

    /// The side key this shape renders to.
    pub fn key(&self) -> String {
        side_key(&self.unit, self.batch, self.streamed)
    }
}

/// The uniform calling convention of one derived signature:
/// `(keys, options, input) -> output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallShape {
    pub input: ValueShape,
    pub output: ValueShape,
}

/// One derived signature: its key, call shape, and the declaration that
/// produced it (kept so call-time validation can reach the concrete unit
/// schemas).
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureEntry {
    pub key: SignatureKey,
    pub shape: CallShape,
    pub method: TransferMethod,
    pub pair: IoPair,
}

/// Read-only table of every callable signature a connector declares,
/// built once at adapter load.
#[derive(Debug, Clone, Default)]
pub struct SignatureTable {
    entries: BTreeMap<SignatureKey, SignatureEntry>,
}

impl SignatureTable {
    /// Derive the signature table of one connector.
    ///
    /// Two IO pairs that resolve to the same compound key are an ambiguous
    /// overload: derivation fails rather than silently overwriting.
    pub fn derive(connector: &ConnectorSchema) -> Result<Self, MediarError> {
        let mut entries = BTreeMap::new();

        for io in &connector.supported_io {
            for (&method, pairs) in &io.io {
                for pair in pairs {
                    let input = ValueShape {
                        unit: UnitKind::of(pair.input().unit())?,
                        batch: pair.input().is_batch(),
                        streamed: method.streams_input(),
                    };
                    let output = ValueShape {
                        unit: UnitKind::of(pair.output().unit())?,
                        batch: pair.output().is_batch(),
                        streamed: method.streams_output(),
                    };

                    let key =
                        SignatureKey::new(io.transformation, input.key(), output.key());
                    let entry = SignatureEntry {
                        key: key.clone(),
                        shape: CallShape { input, output },
                        method,
                        pair: pair.clone(),
                    };

                    if entries.insert(key.clone(), entry).is_some() {
                        return Err(MediarError::SchemaDefinition(format!(
                            "connector '{}': IO pairs resolve to the same signature key '{key}' (ambiguous overload)",
                            connector.id
                        )));
                    }
                }
            }
        }

        tracing::debug!(
            connector = %connector.id,
            signatures = entries.len(),
            "derived signature table"
        );

        Ok(Self { entries })
    }

    pub fn get(&self, key: &SignatureKey) -> Option<&SignatureEntry> {
        self.entries.get(key)
    }

    /// Look up by the rendered dotted form `transformation.inputKey.outputKey`.
    pub fn lookup(&self, rendered: &str) -> Option<&SignatureEntry> {
        let key: SignatureKey = rendered.parse().ok()?;
        self.entries.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignatureEntry> {
        self.entries.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &SignatureKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediar_spec::types::{
        IoUnitSchema, ObjectUnitSchema, OptionsSchema, PayloadKind, StringUnionProp,
        TransformationIo, Transformation,
    };

    fn chat_unit() -> ObjectUnitSchema {
        ObjectUnitSchema::new("chatMessage", PayloadKind::String).with_field(
            "role",
            StringUnionProp::of(["system", "assistant", "user"]).required(),
        )
    }

    fn connector(io: TransformationIo) -> ConnectorSchema {
        ConnectorSchema::new("acme", OptionsSchema::new(["acme-1"])).with_io(io)
    }

    #[test]
    fn static_string_pair_derives_one_plain_key() {
        let table = SignatureTable::derive(&connector(
            TransformationIo::new(Transformation::TextToText).with(
                TransferMethod::StaticInStaticOut,
                vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
            ),
        ))
        .unwrap();

        assert_eq!(table.len(), 1);
        let entry = table.lookup("textToText.string.string").unwrap();
        assert_eq!(entry.shape.input.unit, UnitKind::Text);
        assert!(!entry.shape.input.batch && !entry.shape.input.streamed);
        assert!(!entry.shape.output.batch && !entry.shape.output.streamed);
    }

    #[test]
    fn batched_input_with_streamed_output() {
        let table = SignatureTable::derive(&connector(
            TransformationIo::new(Transformation::TextToText).with(
                TransferMethod::StaticInStreamOut,
                vec![IoPair::new(
                    IoUnitSchema::batch(chat_unit()),
                    PayloadKind::String,
                )],
            ),
        ))
        .unwrap();

        let entry = table
            .lookup("textToText.chatMessageArr.stringStream")
            .unwrap();
        assert_eq!(
            entry.shape.input.unit,
            UnitKind::Object("chatMessage".into())
        );
        assert!(entry.shape.input.batch);
        assert!(!entry.shape.input.streamed, "staticIn never streams input");
        assert!(entry.shape.output.streamed);
        assert!(!entry.shape.output.batch);
    }

    #[test]
    fn stream_in_stream_out_suffixes_both_sides() {
        let table = SignatureTable::derive(&connector(
            TransformationIo::new(Transformation::TextToText).with(
                TransferMethod::StreamInStreamOut,
                vec![IoPair::new(
                    IoUnitSchema::batch(chat_unit()),
                    PayloadKind::String,
                )],
            ),
        ))
        .unwrap();

        assert!(
            table
                .lookup("textToText.chatMessageArrStream.stringStream")
                .is_some()
        );
    }

    #[test]
    fn same_pair_under_different_methods_yields_distinct_keys() {
        let pair = || vec![IoPair::new(PayloadKind::String, PayloadKind::String)];
        let table = SignatureTable::derive(&connector(
            TransformationIo::new(Transformation::TextToText)
                .with(TransferMethod::StaticInStaticOut, pair())
                .with(TransferMethod::StaticInStreamOut, pair())
                .with(TransferMethod::StreamInStaticOut, pair())
                .with(TransferMethod::StreamInStreamOut, pair()),
        ))
        .unwrap();

        let keys: Vec<_> = table.keys().map(ToString::to_string).collect();
        assert_eq!(
            keys,
            [
                "textToText.string.string",
                "textToText.string.stringStream",
                "textToText.stringStream.string",
                "textToText.stringStream.stringStream",
            ]
        );
    }

    #[test]
    fn ambiguous_overload_is_rejected() {
        // Two distinct declarations under one method rendering identically.
        let err = SignatureTable::derive(&connector(
            TransformationIo::new(Transformation::TextToText).with(
                TransferMethod::StaticInStaticOut,
                vec![
                    IoPair::new(PayloadKind::String, PayloadKind::String),
                    IoPair::new(PayloadKind::String, PayloadKind::String),
                ],
            ),
        ))
        .unwrap_err();

        assert!(matches!(err, MediarError::SchemaDefinition(_)));
        assert!(err.to_string().contains("textToText.string.string"));
    }

    #[test]
    fn primitive_and_object_units_never_collide() {
        // A chat unit and a bare string have different base tokens, so the
        // same method can host both.
        let table = SignatureTable::derive(&connector(
            TransformationIo::new(Transformation::TextToText).with(
                TransferMethod::StaticInStaticOut,
                vec![
                    IoPair::new(PayloadKind::String, PayloadKind::String),
                    IoPair::new(chat_unit(), PayloadKind::String),
                ],
            ),
        ))
        .unwrap();
        assert_eq!(table.len(), 2);
    }
}
