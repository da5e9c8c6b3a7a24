//! Core streaming types.

use std::fmt;
use std::pin::Pin;

use futures::Stream;

use mediar_spec::types::UnitValue;

use super::control::{PauseHandle, ResumeHandle, StopHandle};

/// Pinned, boxed increment stream; consumed by one logical reader.
pub type BoxStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// A lazy, single-pass, potentially infinite increment sequence with
/// optional flow-control capabilities.
pub struct StreamOf<T> {
    /// The increments, in production order. Process with
    /// `while let Some(item) = stream.next().await`.
    pub stream: BoxStream<T>,
    pub stop: Option<StopHandle>,
    pub pause: Option<PauseHandle>,
    pub resume: Option<ResumeHandle>,
}

impl<T> StreamOf<T> {
    /// Wrap a stream with no flow-control capabilities.
    pub fn bare<S>(stream: S) -> Self
    where
        S: Stream<Item = T> + Send + 'static,
    {
        Self {
            stream: Box::pin(stream),
            stop: None,
            pause: None,
            resume: None,
        }
    }

    /// Request the producer cease further increments. Returns whether the
    /// stream supports stopping at all; increments already in flight may
    /// still arrive either way.
    pub fn request_stop(&self) -> bool {
        match &self.stop {
            Some(handle) => {
                handle.stop();
                true
            }
            None => false,
        }
    }

    /// Request delivery be held. Returns whether the capability exists.
    pub fn request_pause(&self) -> bool {
        match &self.pause {
            Some(handle) => {
                handle.pause();
                true
            }
            None => false,
        }
    }

    /// Request delivery resume. Returns whether the capability exists.
    pub fn request_resume(&self) -> bool {
        match &self.resume {
            Some(handle) => {
                handle.resume();
                true
            }
            None => false,
        }
    }
}

impl<T> fmt::Debug for StreamOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamOf")
            .field("stop", &self.stop.is_some())
            .field("pause", &self.pause.is_some())
            .field("resume", &self.resume.is_some())
            .finish_non_exhaustive()
    }
}

/// Stream of single unit values.
pub type UnitStream = StreamOf<UnitValue>;

/// Stream of unit batches. Batch-of-units and stream-of-batches compose
/// independently; this is the `ArrStream` case.
pub type UnitBatchStream = StreamOf<Vec<UnitValue>>;

/// Dynamic payload for one registered call: the four arities a call shape
/// can demand on either side.
#[derive(Debug)]
pub enum IoValue {
    Unit(UnitValue),
    Batch(Vec<UnitValue>),
    Stream(UnitStream),
    BatchStream(UnitBatchStream),
}

impl IoValue {
    pub const fn is_streamed(&self) -> bool {
        matches!(self, Self::Stream(_) | Self::BatchStream(_))
    }

    /// Short arity label for diagnostics.
    pub const fn arity(&self) -> &'static str {
        match self {
            Self::Unit(_) => "unit",
            Self::Batch(_) => "unit batch",
            Self::Stream(_) => "unit stream",
            Self::BatchStream(_) => "unit batch stream",
        }
    }
}

impl From<UnitValue> for IoValue {
    fn from(value: UnitValue) -> Self {
        Self::Unit(value)
    }
}

impl From<Vec<UnitValue>> for IoValue {
    fn from(values: Vec<UnitValue>) -> Self {
        Self::Batch(values)
    }
}
