//! Host entry point and exported surface
//!
//! `parse_ass` is the single operation the host calls. Argument problems are
//! raised as errors before the engine runs; problems with the subtitle content
//! are reported inside the returned value (`error: true`).

use thiserror::Error;

use crate::binding::{bind_settings, bind_source, AssSource, BindError, ParseSettings, ToHost};
use crate::encode::EncodeError;
use crate::engine::Engine;
use crate::host::{HostValue, ObjectBuilder};
use crate::marshal::ResultMarshaller;

/// Number of arguments `parse_ass` accepts
pub const PARSE_ASS_ARITY: usize = 2;

/// Names the module exports, in registration order
pub const EXPORTED_NAMES: [&str; 3] = ["parse_ass", "version", "commit_hash"];

/// Host exception class a `CallError` is raised as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// Bad call arguments
    TypeError,
    /// Fatal internal fault
    Error,
}

/// Failure raised to the host instead of returning a value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Wrong number of call arguments
    #[error("Wrong number of arguments")]
    Arity { expected: usize, found: usize },

    /// Source or settings descriptor is malformed
    #[error(transparent)]
    Bind(#[from] BindError),

    /// The engine result cannot be encoded faithfully
    #[error(transparent)]
    Internal(#[from] EncodeError),
}

impl CallError {
    /// Exception class to raise in the host
    #[must_use]
    pub const fn kind(&self) -> ExceptionKind {
        match self {
            Self::Arity { .. } | Self::Bind(_) => ExceptionKind::TypeError,
            Self::Internal(_) => ExceptionKind::Error,
        }
    }
}

/// Parse a subtitle script described by host arguments
///
/// Expects exactly `[source, settings]`. Binding runs before the engine is
/// touched, so a malformed argument never reaches it.
///
/// # Errors
///
/// Returns `CallError::Arity` or `CallError::Bind` for argument problems and
/// `CallError::Internal` when the engine result cannot be encoded.
pub fn parse_ass<E: Engine>(engine: &E, args: &[HostValue]) -> Result<HostValue, CallError> {
    let [source, settings] = args else {
        return Err(CallError::Arity {
            expected: PARSE_ASS_ARITY,
            found: args.len(),
        });
    };

    let source = bind_source(source)?;
    let settings = bind_settings(settings)?;

    Ok(run(engine, &source, settings)?)
}

/// Run an already bound request through the engine and encode the result
///
/// # Errors
///
/// Returns `EncodeError` for internal consistency faults.
pub fn run<E: Engine>(
    engine: &E,
    source: &AssSource,
    settings: ParseSettings,
) -> Result<HostValue, EncodeError> {
    let marshaller = ResultMarshaller::parse(engine, source, settings);
    marshaller.to_host().map_err(|err| {
        log::error!("aborting parse_ass call: {err}");
        err
    })
}

/// The exported module surface
///
/// Built explicitly around a borrowed engine; there is no process-wide
/// registration state.
pub struct Module<'e, E: Engine> {
    engine: &'e E,
}

impl<'e, E: Engine> Module<'e, E> {
    /// Expose `engine` through the module surface
    #[must_use]
    pub const fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    /// Exported property names, in registration order
    #[must_use]
    pub const fn exported_names(&self) -> [&'static str; 3] {
        EXPORTED_NAMES
    }

    /// The `parse_ass` export
    ///
    /// # Errors
    ///
    /// See [`parse_ass`].
    pub fn parse_ass(&self, args: &[HostValue]) -> Result<HostValue, CallError> {
        parse_ass(self.engine, args)
    }

    /// The `version` export, passed through from the engine
    #[must_use]
    pub fn version(&self) -> &'e str {
        self.engine.version()
    }

    /// The `commit_hash` export, passed through from the engine
    #[must_use]
    pub fn commit_hash(&self) -> &'e str {
        self.engine.commit_hash()
    }

    /// Look up an exported data property by name
    ///
    /// `parse_ass` is callable rather than data and yields `None` here, as do
    /// unknown names.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<HostValue> {
        match name {
            "version" => Some(HostValue::from(self.version())),
            "commit_hash" => Some(HostValue::from(self.commit_hash())),
            _ => None,
        }
    }
}

/// Convenience facade over the host entry point
///
/// Mirrors the host-side wrapper: requests go through the same descriptors
/// and validation as a host call. Argument errors are folded into a
/// `{ warnings: [], error: true, message }` result; internal faults are
/// returned as `Err`.
///
/// # Examples
///
/// ```rust,ignore
/// let parser = AssParser::new(engine);
/// let result = parser.parse_string("[Script Info]\n", ParseSettings::non_strict())?;
/// assert_eq!(result.field("error"), Some(&HostValue::Bool(false)));
/// ```
pub struct AssParser<E: Engine> {
    engine: E,
}

impl<E: Engine> AssParser<E> {
    /// Wrap an engine
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The wrapped engine
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Parse a script file
    ///
    /// # Errors
    ///
    /// See [`AssParser::parse`].
    pub fn parse_file(
        &self,
        name: &str,
        settings: ParseSettings,
    ) -> Result<HostValue, EncodeError> {
        self.parse(&AssSource::file(name), settings)
    }

    /// Parse inline script text
    ///
    /// # Errors
    ///
    /// See [`AssParser::parse`].
    pub fn parse_string(
        &self,
        content: &str,
        settings: ParseSettings,
    ) -> Result<HostValue, EncodeError> {
        self.parse(&AssSource::string(content), settings)
    }

    /// Parse from any source, folding argument errors into the result
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` when the engine result cannot be encoded.
    pub fn parse(
        &self,
        source: &AssSource,
        settings: ParseSettings,
    ) -> Result<HostValue, EncodeError> {
        let args = [source.to_host(), settings.to_host()];
        match parse_ass(&self.engine, &args) {
            Ok(value) => Ok(value),
            Err(CallError::Internal(err)) => Err(err),
            Err(err @ (CallError::Arity { .. } | CallError::Bind(_))) => {
                let folded = ObjectBuilder::new()
                    .field("warnings", HostValue::Array(Vec::new()))
                    .field("error", HostValue::Bool(true))
                    .field("message", HostValue::from(err.to_string()))
                    .build();
                Ok(folded)
            }
        }
    }

    /// Engine library version
    pub fn version(&self) -> &str {
        self.engine.version()
    }

    /// Engine build identifier
    pub fn commit_hash(&self) -> &str {
        self.engine.commit_hash()
    }
}
