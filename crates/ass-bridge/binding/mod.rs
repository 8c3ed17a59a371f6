//! Decoding of host descriptors into typed requests
//!
//! Each binder is a pure function from an untyped host value to a typed value
//! or a `BindError`. Lookups happen in a fixed order and stop at the first
//! problem, so a malformed descriptor always produces the same message.
//!
//! # Module Organization
//!
//! - `source` - `AssSource` and `bind_source`
//! - `settings` - `ParseSettings` tree and `bind_settings`

pub mod settings;
pub mod source;

pub use settings::{
    bind_settings, ParseSettings, ScriptInfoStrictSettings, SettingsError, StrictSettings,
};
pub use source::{bind_source, AssSource};

use core::fmt;

use thiserror::Error;

use crate::host::HostValue;

/// Expected kind of a descriptor field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedKind {
    /// Host string
    String,
    /// Host boolean
    Boolean,
    /// Host object
    Object,
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "a string"),
            Self::Boolean => write!(f, "a boolean"),
            Self::Object => write!(f, "an object"),
        }
    }
}

/// Argument shape or type problem in a source or settings descriptor
///
/// Always raised before the engine runs. Paths are dotted and rooted at the
/// argument name, e.g. `settings.strict_settings.allow_number_truncating`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The argument itself is not an object
    #[error("the '{argument}' argument needs to be an object")]
    NotAnObject { argument: &'static str },

    /// A mandatory field is absent
    ///
    /// `condition` names the `type` tag that made a variant field mandatory.
    #[error(
        "the '{}' argument needs to have a '{}' key{}",
        parent_of(.path),
        key_of(.path),
        condition_suffix(.condition)
    )]
    MissingField {
        path: String,
        condition: Option<&'static str>,
    },

    /// A field is present with the wrong type
    #[error("{path} needs to be {expected}")]
    WrongType { path: String, expected: ExpectedKind },

    /// A string field holds a value outside its allowed set
    #[error("{path} needs to be either {}", quote_alternatives(.allowed))]
    InvalidEnumValue {
        path: String,
        allowed: &'static [&'static str],
    },
}

impl BindError {
    /// Full dotted path of the offending field, or the argument name
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NotAnObject { argument } => argument,
            Self::MissingField { path, .. }
            | Self::WrongType { path, .. }
            | Self::InvalidEnumValue { path, .. } => path,
        }
    }

    /// Last path segment, i.e. the field name itself
    #[must_use]
    pub fn field(&self) -> &str {
        key_of(self.path())
    }
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('.').map_or(path, |(parent, _)| parent)
}

fn key_of(path: &str) -> &str {
    path.rsplit_once('.').map_or(path, |(_, key)| key)
}

#[allow(clippy::ref_option)]
fn condition_suffix(condition: &Option<&str>) -> String {
    condition.map_or_else(String::new, |tag| format!(", if the type is '{tag}'"))
}

fn quote_alternatives(allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|value| format!("'{value}'")).collect();
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

/// A host object being decoded, together with its dotted path
///
/// Accessors check presence first and type second, matching the order the
/// host-facing error messages promise.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Record<'v> {
    path: &'v str,
    value: &'v HostValue,
}

/// Owned counterpart of `Record` for nested objects whose path is built on the fly
#[derive(Debug, Clone)]
pub(crate) struct NestedRecord<'v> {
    path: String,
    value: &'v HostValue,
}

impl<'v> Record<'v> {
    /// Open a top-level argument, failing if it is not an object
    pub(crate) fn argument(argument: &'static str, value: &'v HostValue) -> Result<Self, BindError> {
        if !value.is_object() {
            return Err(BindError::NotAnObject { argument });
        }
        Ok(Self {
            path: argument,
            value,
        })
    }
}

/// Shared field access for top-level and nested records
pub(crate) trait Fields<'v> {
    /// Dotted path of this record
    fn path(&self) -> &str;

    /// The underlying host value (known to be object-like)
    fn value(&self) -> &'v HostValue;

    /// Path of a child field
    fn child_path(&self, key: &str) -> String {
        format!("{}.{key}", self.path())
    }

    /// Look up a field that is mandatory, optionally only for one `type` tag
    fn lookup(
        &self,
        key: &str,
        condition: Option<&'static str>,
    ) -> Result<&'v HostValue, BindError> {
        self.value().field(key).ok_or_else(|| BindError::MissingField {
            path: self.child_path(key),
            condition,
        })
    }

    /// Look up a mandatory field
    fn field(&self, key: &str) -> Result<&'v HostValue, BindError> {
        self.lookup(key, None)
    }

    /// Read a string field, mandatory only when `type` is `type_tag`
    fn variant_string(&self, key: &str, type_tag: &'static str) -> Result<&'v str, BindError> {
        self.lookup(key, Some(type_tag))?
            .as_str()
            .ok_or_else(|| BindError::WrongType {
                path: self.child_path(key),
                expected: ExpectedKind::String,
            })
    }

    /// Read a mandatory string field
    fn string(&self, key: &str) -> Result<&'v str, BindError> {
        self.field(key)?.as_str().ok_or_else(|| BindError::WrongType {
            path: self.child_path(key),
            expected: ExpectedKind::String,
        })
    }

    /// Read a mandatory boolean field
    fn boolean(&self, key: &str) -> Result<bool, BindError> {
        let value = self.field(key)?.as_bool().ok_or_else(|| BindError::WrongType {
            path: self.child_path(key),
            expected: ExpectedKind::Boolean,
        })?;
        log::trace!("bound {} = {value}", self.child_path(key));
        Ok(value)
    }

    /// Descend into a mandatory object field
    fn object(&self, key: &str) -> Result<NestedRecord<'v>, BindError> {
        let value = self.field(key)?;
        if !value.is_object() {
            return Err(BindError::WrongType {
                path: self.child_path(key),
                expected: ExpectedKind::Object,
            });
        }
        Ok(NestedRecord {
            path: self.child_path(key),
            value,
        })
    }
}

impl<'v> Fields<'v> for Record<'v> {
    fn path(&self) -> &str {
        self.path
    }

    fn value(&self) -> &'v HostValue {
        self.value
    }
}

impl<'v> Fields<'v> for NestedRecord<'v> {
    fn path(&self) -> &str {
        &self.path
    }

    fn value(&self) -> &'v HostValue {
        self.value
    }
}

/// Encode a typed request back into its host descriptor
///
/// Implemented by `AssSource` and `ParseSettings`; binding the produced
/// descriptor yields the original value again.
pub trait ToHost {
    /// Build the host descriptor
    fn to_host(&self) -> HostValue;
}
