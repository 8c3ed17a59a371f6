//! # ASS Bridge
//!
//! Validating marshalling layer between a dynamic host runtime and an ASS
//! (Advanced `SubStation` Alpha) parsing engine. Untyped host descriptors are
//! decoded into a strongly typed request, the engine runs once, and its result
//! is encoded back into host values without losing numeric, string or enum
//! information.
//!
//! ## Pipeline
//!
//! - **Binding**: `bind_source` and `bind_settings` decode host objects with a
//!   fixed lookup order and fail fast with a `BindError`
//! - **Engine**: any implementation of the `Engine` trait
//! - **Ownership**: `ResultMarshaller` owns the engine's result handle and
//!   releases it exactly once
//! - **Encoding**: total value encoders plus an insertion-ordered
//!   `ObjectBuilder` produce the host result
//!
//! ## Quick Start
//!
//! ```rust
//! use ass_bridge::{bind_settings, bind_source, AssSource, HostValue};
//! use serde_json::json;
//!
//! let source = bind_source(&HostValue::from(json!({
//!     "type": "string",
//!     "content": "[Script Info]\nTitle: Example\n",
//! })))?;
//! assert!(matches!(source, AssSource::String { .. }));
//!
//! let err = bind_settings(&HostValue::from(json!({ "strict_settings": {} }))).unwrap_err();
//! assert_eq!(err.path(), "settings.strict_settings.script_info");
//! # Ok::<(), ass_bridge::BindError>(())
//! ```
//!
//! Malformed call arguments are raised as `CallError`; malformed subtitle
//! content never is. It comes back as data with `error: true`.

#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod binding;
pub mod encode;
pub mod engine;
pub mod entry;
pub mod host;
pub mod marshal;
pub mod native;

pub use binding::{
    bind_settings, bind_source, AssSource, BindError, ParseSettings, ScriptInfoStrictSettings,
    SettingsError, StrictSettings, ToHost,
};
pub use encode::EncodeError;
pub use engine::Engine;
pub use entry::{parse_ass, AssParser, CallError, ExceptionKind, Module};
pub use host::{HostObject, HostValue, ObjectBuilder};
pub use marshal::{ParseOutcome, ResultMarshaller};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
