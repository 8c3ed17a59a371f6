//! Parsing engine seam
//!
//! The grammar and semantic parsing live in an external engine. This trait is
//! the complete surface the bridge consumes from it: one parse call that
//! yields an owned result handle, accessors on that handle, the handle's
//! release function, diagnostics, the string normalisation primitive and the
//! version identifiers.
//!
//! Engine-allocated text is returned as `Engine::Text`. Dropping a `Text`
//! releases the engine buffer, so callers copy what they need and let it go
//! out of scope before returning.

use crate::binding::{AssSource, ParseSettings};
use crate::native::{AssResult, FinalStr};

/// External ASS parsing engine
///
/// Handles are produced by `parse` and must be passed back to `free_result`
/// exactly once. Use [`ResultMarshaller`](crate::ResultMarshaller) rather than
/// calling `free_result` directly.
pub trait Engine {
    /// Opaque result of one parse attempt
    type Handle;

    /// One diagnostic collected during parsing
    type Warning;

    /// Engine-owned text buffer, released on drop
    type Text: AsRef<str>;

    /// Run one synchronous parse
    ///
    /// Returns `None` when the engine could not allocate a result.
    fn parse(&self, source: &AssSource, settings: ParseSettings) -> Option<Self::Handle>;

    /// Whether the engine classified the input as invalid
    fn result_is_error(&self, handle: &Self::Handle) -> bool;

    /// Failure description for an error result
    fn result_error(&self, handle: &Self::Handle) -> Option<Self::Text>;

    /// Parsed document for a successful result
    fn result_value<'h>(&self, handle: &'h Self::Handle) -> Option<&'h AssResult>;

    /// Release a result handle
    fn free_result(&self, handle: Self::Handle);

    /// Diagnostics collected while producing the result, in report order
    fn diagnostics<'h>(&self, handle: &'h Self::Handle) -> &'h [Self::Warning];

    /// Human-readable message for one diagnostic
    fn warning_message(&self, warning: &Self::Warning) -> Self::Text;

    /// Normalise a raw text span for display
    fn normalize(&self, text: &FinalStr) -> Self::Text;

    /// Engine library version
    fn version(&self) -> &str;

    /// Engine build identifier
    fn commit_hash(&self) -> &str;
}
