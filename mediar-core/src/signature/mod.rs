//! Signature derivation.
//!
//! Projects a connector schema into the namespace of callable signatures:
//! every (transformation, transfer method, IO pair) declaration becomes one
//! dotted key `transformation.inputKey.outputKey` bound to a call shape
//! `(keys, options, input) -> output`. The naming rules are the interop
//! contract for every tool built against derived call paths, so they are
//! explicit and executable here rather than encoded in any type system.

mod key;
mod table;

pub use key::*;
pub use table::*;
