//! Native-to-host value encoding
//!
//! Total mapping functions from engine value kinds to host values. The only
//! failure is an enum ordinal with no table entry, which means the engine and
//! this crate are out of sync and is reported as a fatal `EncodeError`.
//!
//! # Numeric width policy
//!
//! Size-valued fields are encoded as plain numbers up to and including
//! `u32::MAX` and as `BigInt` above it. The cutover is exact and applies to
//! every size field (font size, margins, resolution, encoding id, ...).

pub mod document;

pub use document::DocumentEncoder;

use thiserror::Error;

use crate::engine::Engine;
use crate::host::{HostValue, ObjectBuilder};
use crate::native::{AssColor, AssTime, EnumFamily, FinalStr, MarginValue, Ordinal};

/// Host label used for an event margin without override
pub const DEFAULT_MARGIN: &str = "default";

/// Largest size encoded as a plain host number
pub const MAX_PLAIN_SIZE: u64 = u32::MAX as u64;

/// Internal consistency fault while encoding an engine result
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// An enum ordinal has no entry in its family table
    #[error("internal consistency fault: {family} ordinal {ordinal} has no host mapping")]
    UnmappedOrdinal { family: &'static str, ordinal: u32 },

    /// A successful result handle carried no document
    #[error("internal consistency fault: engine reported success without a document")]
    MissingDocument,
}

/// Encode a boolean
#[must_use]
pub const fn encode_bool(value: bool) -> HostValue {
    HostValue::Bool(value)
}

/// Encode a bounded unsigned quantity
#[must_use]
pub fn encode_u32(value: u32) -> HostValue {
    HostValue::Number(f64::from(value))
}

/// Encode a fractional quantity
#[must_use]
pub const fn encode_f64(value: f64) -> HostValue {
    HostValue::Number(value)
}

/// Encode an unbounded size quantity using the numeric width policy
///
/// # Examples
///
/// ```rust
/// use ass_bridge::encode::encode_size;
/// use ass_bridge::HostValue;
///
/// assert_eq!(encode_size(4_294_967_295), HostValue::Number(4_294_967_295.0));
/// assert_eq!(encode_size(4_294_967_296), HostValue::BigInt(4_294_967_296));
/// ```
#[must_use]
pub fn encode_size(value: u64) -> HostValue {
    match u32::try_from(value) {
        Ok(small) => encode_u32(small),
        Err(_) => HostValue::BigInt(i128::from(value)),
    }
}

/// Encode raw engine text
///
/// Zero-length spans become the empty string without touching the engine.
/// Otherwise the engine normalises the span and its buffer is released as
/// soon as the host string has been copied out.
pub fn encode_text<E: Engine>(engine: &E, text: &FinalStr) -> HostValue {
    if text.is_empty() {
        return HostValue::String(String::new());
    }
    let normalized = engine.normalize(text);
    HostValue::String(normalized.as_ref().to_owned())
}

/// Encode an enum ordinal through its family table
///
/// # Errors
///
/// Returns `EncodeError::UnmappedOrdinal` if the ordinal is not in the table.
pub fn encode_enum<T: EnumFamily>(ordinal: Ordinal<T>) -> Result<HostValue, EncodeError> {
    ordinal
        .resolve()
        .map(EnumFamily::to_host)
        .ok_or(EncodeError::UnmappedOrdinal {
            family: T::NAME,
            ordinal: ordinal.value(),
        })
}

/// Encode an event margin
///
/// Only the `is_default` flag selects the sentinel; the payload is ignored
/// in that case.
#[must_use]
pub fn encode_margin(margin: &MarginValue) -> HostValue {
    if margin.is_default {
        return HostValue::from(DEFAULT_MARGIN);
    }
    encode_size(margin.value)
}

/// Encode a colour as `{ r, g, b, a }`
#[must_use]
pub fn encode_color(color: &AssColor) -> HostValue {
    ObjectBuilder::new()
        .field("r", encode_u32(color.r.into()))
        .field("g", encode_u32(color.g.into()))
        .field("b", encode_u32(color.b.into()))
        .field("a", encode_u32(color.a.into()))
        .build()
}

/// Encode a timestamp as `{ hour, min, sec, hundred }`
#[must_use]
pub fn encode_time(time: &AssTime) -> HostValue {
    ObjectBuilder::new()
        .field("hour", encode_u32(time.hour))
        .field("min", encode_u32(time.min.into()))
        .field("sec", encode_u32(time.sec.into()))
        .field("hundred", encode_u32(time.hundred.into()))
        .build()
}
