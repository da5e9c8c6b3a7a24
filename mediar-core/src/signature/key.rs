//! Signature key construction: the suffix algebra.
//!
//! Each side of a key is the unit's base token plus suffixes in a fixed
//! order: base, then `Arr` when the side is an ordered batch, then `Stream`
//! when the transfer method streams that side. The two suffixes compose
//! independently - a stream of batches renders `<base>ArrStream`, never
//! `<base>StreamArr`.

use std::fmt;
use std::str::FromStr;

use mediar_spec::MediarError;
use mediar_spec::types::{PayloadKind, Transformation, UnitSchema};

/// Identity of one unit shape for naming purposes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitKind {
    /// Bare string payload.
    Text,
    /// Bare binary payload.
    Blob,
    /// Object unit, identified by its `unitId` literal.
    Object(String),
}

impl UnitKind {
    /// The naming identity of a unit. Object units must carry a well-formed
    /// `unitId`; schema checking guarantees that before derivation runs.
    pub fn of(unit: &UnitSchema) -> Result<Self, MediarError> {
        match unit {
            UnitSchema::Payload(PayloadKind::String) => Ok(Self::Text),
            UnitSchema::Payload(PayloadKind::Binary) => Ok(Self::Blob),
            UnitSchema::Object(object) => object.id().map(|id| Self::Object(id.to_string())).ok_or_else(
                || {
                    MediarError::SchemaDefinition(
                        "object unit has a malformed unitId".to_string(),
                    )
                },
            ),
        }
    }

    /// The base key token: the literal tag for primitive units, the
    /// `unitId` literal for object units.
    pub fn base_key(&self) -> &str {
        match self {
            Self::Text => "string",
            Self::Blob => "binary",
            Self::Object(id) => id,
        }
    }
}

/// Render one side of a signature key.
pub fn side_key(kind: &UnitKind, batch: bool, streamed: bool) -> String {
    let mut key = kind.base_key().to_string();
    if batch {
        key.push_str("Arr");
    }
    if streamed {
        key.push_str("Stream");
    }
    key
}

/// The derived identity of one callable: `transformation.inputKey.outputKey`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignatureKey {
    pub transformation: Transformation,
    pub input: String,
    pub output: String,
}

impl SignatureKey {
    pub fn new(
        transformation: Transformation,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            transformation,
            input: input.into(),
            output: output.into(),
        }
    }
}

impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.transformation, self.input, self.output)
    }
}

impl FromStr for SignatureKey {
    type Err = ();

    /// Parse a dotted `transformation.inputKey.outputKey` triple.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let (Some(transformation), Some(input), Some(output), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(());
        };
        if input.is_empty() || output.is_empty() {
            return Err(());
        }
        Ok(Self {
            transformation: transformation.parse()?,
            input: input.to_string(),
            output: output.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediar_spec::types::ObjectUnitSchema;

    #[test]
    fn base_keys() {
        assert_eq!(UnitKind::Text.base_key(), "string");
        assert_eq!(UnitKind::Blob.base_key(), "binary");
        assert_eq!(
            UnitKind::Object("chatMessage".into()).base_key(),
            "chatMessage"
        );
    }

    #[test]
    fn unit_kind_of_object_unit_uses_the_literal() {
        let unit: UnitSchema =
            ObjectUnitSchema::new("chatMessage", PayloadKind::String).into();
        assert_eq!(
            UnitKind::of(&unit).unwrap(),
            UnitKind::Object("chatMessage".into())
        );
    }

    #[test]
    fn suffix_order_is_base_arr_stream() {
        let kind = UnitKind::Object("chatMessage".into());
        assert_eq!(side_key(&kind, false, false), "chatMessage");
        assert_eq!(side_key(&kind, true, false), "chatMessageArr");
        assert_eq!(side_key(&kind, false, true), "chatMessageStream");
        assert_eq!(side_key(&kind, true, true), "chatMessageArrStream");
    }

    #[test]
    fn key_display_and_parse_roundtrip() {
        let key = SignatureKey::new(Transformation::TextToText, "chatMessageArr", "stringStream");
        let rendered = key.to_string();
        assert_eq!(rendered, "textToText.chatMessageArr.stringStream");
        assert_eq!(rendered.parse::<SignatureKey>(), Ok(key));

        assert!("textToText.only".parse::<SignatureKey>().is_err());
        assert!("notATransformation.a.b".parse::<SignatureKey>().is_err());
        assert!("textToText.a.b.c".parse::<SignatureKey>().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Arr always precedes Stream, whatever the base token.
            #[test]
            fn arr_never_follows_stream(base in "[a-z][a-zA-Z0-9]{0,24}") {
                let kind = UnitKind::Object(base.clone());
                let rendered = side_key(&kind, true, true);
                prop_assert_eq!(rendered, format!("{base}ArrStream"));
            }
        }
    }
}
