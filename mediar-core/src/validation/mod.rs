//! Schema checking and value validation.
//!
//! Two separate passes with separate failure classes:
//! - **`schema`** - load-time well-formedness of declarations themselves
//!   (`SchemaDefinition` errors, fatal for the adapter);
//! - **`value`** - call-time validation of supplied values, including
//!   default materialization (`Validation` errors, recoverable per call).

mod schema;
mod value;

pub use schema::*;
pub use value::*;
