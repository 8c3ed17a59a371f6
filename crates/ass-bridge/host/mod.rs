//! Host value model
//!
//! The dynamic host runtime is represented by a closed set of value kinds so
//! that decoding and encoding can be written as plain Rust functions without
//! tying the crate to one embedding API.
//!
//! # Module Organization
//!
//! - `value` - The `HostValue` enum and its introspection primitives
//! - `object` - Insertion-ordered `HostObject` and the `ObjectBuilder`
//! - `json` - Conversions between host values and `serde_json` values

pub mod json;
pub mod object;
pub mod value;

pub use object::{build_object, HostObject, ObjectBuilder};
pub use value::HostValue;
