//! mediar-registry
//!
//! Adapter registration and capability matching.
//!
//! An adapter binds concrete implementations behind the signature keys its
//! connector schemas derive. Registration is the only way implementations
//! enter the system: it fails fast on any schema or binding defect and
//! returns an immutable handle, so no partially-usable registry state ever
//! escapes.
#![deny(unsafe_code)]

// Keep a small stable surface; the schema model and derivation rules are
// re-exported from the crates that own them.
pub use mediar_core::{signature, streaming, validation};
pub use mediar_spec::{MediarError, error, types};

pub mod capability;
pub mod registry;
