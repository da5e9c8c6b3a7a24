//! mediar-spec
//!
//! Declarative connector schemas and shared data types for mediar.
//!
//! This crate intentionally contains only *spec-level* types: property,
//! unit, options, and transformation schemas, the connector declaration
//! bundling them, capability query objects, and the runtime value model.
//! Schema checking, signature derivation, and adapter registration live in
//! other crates (`mediar-core`, `mediar-registry`).
#![deny(unsafe_code)]

pub mod error;
pub mod types;

pub use error::MediarError;
