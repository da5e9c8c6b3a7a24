//! Transformations, transfer methods, and supported IO declarations.
//!
//! A connector declares, per modality transformation, which (input unit,
//! output unit) pairs its wire API accepts under each transfer method.
//! These declarations are the sole input to signature derivation.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::unit::UnitSchema;

/// A modality pair the system transforms between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transformation {
    TextToText,
    TextToImage,
    TextToAudio,
    TextToVideo,
    ImageToText,
    ImageToImage,
    ImageToAudio,
    ImageToVideo,
    VideoToText,
    VideoToImage,
    VideoToAudio,
    VideoToVideo,
}

impl Transformation {
    pub const ALL: [Self; 12] = [
        Self::TextToText,
        Self::TextToImage,
        Self::TextToAudio,
        Self::TextToVideo,
        Self::ImageToText,
        Self::ImageToImage,
        Self::ImageToAudio,
        Self::ImageToVideo,
        Self::VideoToText,
        Self::VideoToImage,
        Self::VideoToAudio,
        Self::VideoToVideo,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TextToText => "textToText",
            Self::TextToImage => "textToImage",
            Self::TextToAudio => "textToAudio",
            Self::TextToVideo => "textToVideo",
            Self::ImageToText => "imageToText",
            Self::ImageToImage => "imageToImage",
            Self::ImageToAudio => "imageToAudio",
            Self::ImageToVideo => "imageToVideo",
            Self::VideoToText => "videoToText",
            Self::VideoToImage => "videoToImage",
            Self::VideoToAudio => "videoToAudio",
            Self::VideoToVideo => "videoToVideo",
        }
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transformation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Whether each side of a transformation is exchanged as a single buffered
/// value or as a lazy increment stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransferMethod {
    StaticInStaticOut,
    StaticInStreamOut,
    StreamInStaticOut,
    StreamInStreamOut,
}

impl TransferMethod {
    pub const ALL: [Self; 4] = [
        Self::StaticInStaticOut,
        Self::StaticInStreamOut,
        Self::StreamInStaticOut,
        Self::StreamInStreamOut,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StaticInStaticOut => "staticInStaticOut",
            Self::StaticInStreamOut => "staticInStreamOut",
            Self::StreamInStaticOut => "streamInStaticOut",
            Self::StreamInStreamOut => "streamInStreamOut",
        }
    }

    pub const fn streams_input(self) -> bool {
        matches!(self, Self::StreamInStaticOut | Self::StreamInStreamOut)
    }

    pub const fn streams_output(self) -> bool {
        matches!(self, Self::StaticInStreamOut | Self::StreamInStreamOut)
    }
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of an IO pair: a single unit per call, or an ordered batch of
/// units of one shape. On the wire a batch is written `[unit]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IoUnitSchema {
    Unit(UnitSchema),
    Batch([UnitSchema; 1]),
}

impl IoUnitSchema {
    pub fn batch(unit: impl Into<UnitSchema>) -> Self {
        Self::Batch([unit.into()])
    }

    /// The unit shape, regardless of batching.
    pub fn unit(&self) -> &UnitSchema {
        match self {
            Self::Unit(unit) => unit,
            Self::Batch([unit]) => unit,
        }
    }

    pub const fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }
}

impl From<UnitSchema> for IoUnitSchema {
    fn from(unit: UnitSchema) -> Self {
        Self::Unit(unit)
    }
}

impl From<super::unit::PayloadKind> for IoUnitSchema {
    fn from(kind: super::unit::PayloadKind) -> Self {
        Self::Unit(kind.into())
    }
}

impl From<super::unit::ObjectUnitSchema> for IoUnitSchema {
    fn from(unit: super::unit::ObjectUnitSchema) -> Self {
        Self::Unit(unit.into())
    }
}

/// An ordered (input, output) unit pair supported under one transfer
/// method. Serialized as a two-element sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoPair(pub IoUnitSchema, pub IoUnitSchema);

impl IoPair {
    pub fn new(input: impl Into<IoUnitSchema>, output: impl Into<IoUnitSchema>) -> Self {
        Self(input.into(), output.into())
    }

    pub const fn input(&self) -> &IoUnitSchema {
        &self.0
    }

    pub const fn output(&self) -> &IoUnitSchema {
        &self.1
    }
}

/// The supported IO pairs of one transformation, keyed by transfer method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationIo {
    #[serde(rename = "type")]
    pub transformation: Transformation,
    pub io: BTreeMap<TransferMethod, Vec<IoPair>>,
}

impl TransformationIo {
    pub fn new(transformation: Transformation) -> Self {
        Self {
            transformation,
            io: BTreeMap::new(),
        }
    }

    pub fn with(mut self, method: TransferMethod, pairs: Vec<IoPair>) -> Self {
        self.io.insert(method, pairs);
        self
    }

    /// Pairs declared under the given method; empty when undeclared.
    pub fn pairs(&self, method: TransferMethod) -> &[IoPair] {
        self.io.get(&method).map_or(&[], Vec::as_slice)
    }
}
