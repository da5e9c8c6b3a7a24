//! The mediar error taxonomy.
//!
//! Load-time errors (`SchemaDefinition`, `AdapterLoad`) are fatal: an
//! adapter whose schemas fail these checks never becomes usable. Call-time
//! and query-time errors are recoverable per call and never poison
//! previously validated state.

use thiserror::Error;

/// Errors produced by schema loading, adapter registration, and call-time
/// validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediarError {
    /// A connector schema is malformed: contradictory leaf constraints,
    /// conflicting `unitId` structures, an ambiguous derived signature key,
    /// an options schema without a required `model` union, or a malformed
    /// `of` list. Load-time, fatal.
    #[error("Schema definition error: {0}")]
    SchemaDefinition(String),

    /// An adapter could not be materialized, e.g. an implementation is
    /// missing for a declared signature key. Load-time, fatal.
    #[error("Adapter load error: {0}")]
    AdapterLoad(String),

    /// A supplied value violates its schema: bounds, union membership, a
    /// missing required field, or an unknown extra field. Call-time,
    /// recoverable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No connector or derived signature exists under the requested name.
    /// Call-time, recoverable.
    #[error("Unknown signature: {0}")]
    UnknownSignature(String),

    /// A requirement is not covered by a connector's declared IO. Produced
    /// only by the `ensure_*` helpers; the capability matcher itself
    /// reports mismatch as a plain boolean. Query-time, recoverable.
    #[error("Capability mismatch: {0}")]
    CapabilityMismatch(String),

    /// JSON (de)serialization failure in schema tooling.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl MediarError {
    /// Whether this error must abort adapter loading (as opposed to a
    /// recoverable per-call or per-query failure).
    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::SchemaDefinition(_) | Self::AdapterLoad(_))
    }
}
