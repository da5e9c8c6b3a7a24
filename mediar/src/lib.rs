//! # Mediar - Declarative Connector Schemas for AI Model Adapters
//!
//! Mediar describes heterogeneous AI-model vendor APIs (text, image, audio,
//! video transformations) as plain data and derives one uniform calling
//! convention from those descriptions. A connector author declares which
//! transformations a vendor supports, which secret keys it needs, which
//! tunables it exposes, and which concrete unit shapes its wire API
//! accepts; mediar derives `transformation.inputKey.outputKey` signatures
//! from that declaration and binds implementations behind them at adapter
//! load.
//!
#![deny(unsafe_code)]
//!
//! ## Architecture
//!
//! - **`mediar-spec`** - the schema model: property, unit, options, and
//!   transformation schemas plus the runtime value model. Plain
//!   serializable data, immutable after construction.
//! - **`mediar-core`** - schema checking, value validation with default
//!   materialization, signature derivation, and the stream contract.
//! - **`mediar-registry`** - the capability matcher and the adapter
//!   registry. `Adapter::register` is the only way implementations enter
//!   the system; it fails fast on any defect and returns an immutable
//!   handle.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mediar::prelude::*;
//! use mediar::types::{IoPair, PayloadKind, TransferMethod, TransformationIo};
//!
//! # struct Gpt;
//! # #[async_trait::async_trait]
//! # impl TransformFn for Gpt {
//! #     async fn call(
//! #         &self,
//! #         _keys: &mediar::types::SecretMap,
//! #         _options: &mediar::types::OptionsValue,
//! #         input: mediar::streaming::IoValue,
//! #     ) -> Result<mediar::streaming::IoValue, MediarError> { Ok(input) }
//! # }
//! fn load() -> Result<Adapter, MediarError> {
//!     let schema = ConnectorSchema::new("gpt", OptionsSchema::new(["gpt-4o"]))
//!         .with_key(KeySchema::new("OPENAI_API_KEY"))
//!         .with_io(TransformationIo::new(Transformation::TextToText).with(
//!             TransferMethod::StaticInStaticOut,
//!             vec![IoPair::new(PayloadKind::String, PayloadKind::String)],
//!         ));
//!
//!     Adapter::register(
//!         "openai",
//!         "0.1.0",
//!         vec![schema],
//!         Implementations::new().bind("gpt", "textToText.string.string", Arc::new(Gpt)),
//!     )
//! }
//! ```
//!
//! The derived call paths double as CLI tokens:
//! `payload | host openai.gpt.textToText.string.string --model gpt-4o | host`.

pub use mediar_core::{signature, streaming, validation};
pub use mediar_registry::{capability, registry};
pub use mediar_spec::{MediarError, error, types};

/// Common imports for connector authors and consumers.
pub mod prelude {
    pub use crate::MediarError;
    pub use crate::capability::{ensure_satisfies, feature_satisfied, satisfies};
    pub use crate::registry::{Adapter, AdapterSet, Implementations, TransformFn};
    pub use crate::signature::{SignatureKey, SignatureTable};
    pub use crate::streaming::{IoValue, StreamOf, UnitStream, controllable};
    pub use crate::types::{
        ConnectorSchema, Feature, KeySchema, ObjectUnitSchema, OptionsSchema, Requirement,
        Transformation, UnitValue,
    };
}
