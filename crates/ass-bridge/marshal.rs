//! Ownership of engine result handles
//!
//! `ResultMarshaller` is the single owner of the handle produced by one
//! engine call. It can be queried any number of times and releases the handle
//! exactly once when dropped. It is deliberately not `Clone`: a second owner
//! would release the same handle twice. Moving it transfers ownership.

use crate::binding::{AssSource, ParseSettings};
use crate::encode::{DocumentEncoder, EncodeError};
use crate::engine::Engine;
use crate::host::{HostValue, ObjectBuilder};
use crate::native::AssResult;

/// Classified result of one parse attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<'h> {
    /// The engine produced no document
    ///
    /// `message` is `None` when the engine could not allocate a result at all.
    Error { message: Option<String> },

    /// The engine produced a document
    Ok { document: &'h AssResult },
}

impl ParseOutcome<'_> {
    /// Check for the error variant
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Single owner of one engine result handle
pub struct ResultMarshaller<'e, E: Engine> {
    engine: &'e E,
    handle: Option<E::Handle>,
}

impl<'e, E: Engine> ResultMarshaller<'e, E> {
    /// Take ownership of a handle returned by `engine`
    ///
    /// `None` stands for the engine's allocation failure path.
    pub fn new(engine: &'e E, handle: Option<E::Handle>) -> Self {
        Self { engine, handle }
    }

    /// Run one engine parse and take ownership of its result
    pub fn parse(engine: &'e E, source: &AssSource, settings: ParseSettings) -> Self {
        log::debug!(
            "invoking parse engine {} for {} source",
            engine.version(),
            source.type_tag()
        );
        let handle = engine.parse(source, settings);
        if handle.is_none() {
            log::debug!("parse engine returned no result handle");
        }
        Self::new(engine, handle)
    }

    /// Check whether a live handle is held
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    /// Diagnostics in engine report order, empty without a handle
    #[must_use]
    pub fn diagnostics(&self) -> &[E::Warning] {
        match &self.handle {
            Some(handle) => self.engine.diagnostics(handle),
            None => &[],
        }
    }

    /// Diagnostic messages, each copied out of its engine buffer
    #[must_use]
    pub fn warning_messages(&self) -> Vec<String> {
        self.diagnostics()
            .iter()
            .map(|warning| self.engine.warning_message(warning).as_ref().to_owned())
            .collect()
    }

    /// Classify the result
    ///
    /// # Errors
    ///
    /// Returns `EncodeError::MissingDocument` if the engine reports success
    /// but exposes no document.
    pub fn outcome(&self) -> Result<ParseOutcome<'_>, EncodeError> {
        let Some(handle) = self.handle.as_ref() else {
            return Ok(ParseOutcome::Error { message: None });
        };

        if self.engine.result_is_error(handle) {
            let message = self
                .engine
                .result_error(handle)
                .map(|text| text.as_ref().to_owned());
            return Ok(ParseOutcome::Error { message });
        }

        self.engine
            .result_value(handle)
            .map(|document| ParseOutcome::Ok { document })
            .ok_or(EncodeError::MissingDocument)
    }

    /// Encode diagnostics and outcome as the host result object
    ///
    /// The object is `{ warnings, error, message? }` for failures and
    /// `{ warnings, error, result }` for successes.
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` for internal consistency faults.
    pub fn to_host(&self) -> Result<HostValue, EncodeError> {
        let warnings = self
            .warning_messages()
            .into_iter()
            .map(|message| {
                ObjectBuilder::new()
                    .field("message", HostValue::from(message))
                    .build()
            })
            .collect();

        let builder = ObjectBuilder::new().field("warnings", HostValue::Array(warnings));

        let value = match self.outcome()? {
            ParseOutcome::Error { message } => builder
                .field("error", HostValue::Bool(true))
                .optional_field("message", message.map(HostValue::from)),
            ParseOutcome::Ok { document } => builder
                .field("error", HostValue::Bool(false))
                .field("result", DocumentEncoder::new(self.engine).document(document)?),
        };

        Ok(value.build())
    }
}

impl<E: Engine> Drop for ResultMarshaller<'_, E> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("releasing parse result handle");
            self.engine.free_result(handle);
        }
    }
}
