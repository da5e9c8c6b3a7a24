//! mediar-core
//!
//! Connector-agnostic core for mediar: schema well-formedness checking,
//! value validation with default materialization, signature derivation,
//! and the stream contract crossed at the vendor-implementation boundary.
//!
//! Everything here is pure data transformation over immutable schema
//! values. No I/O happens in this crate; concurrency surfaces only at the
//! `streaming` contract, which vendor implementations produce and callers
//! consume.
#![deny(unsafe_code)]

pub mod signature;
pub mod streaming;
pub mod validation;

pub use mediar_spec::{MediarError, error, types};
