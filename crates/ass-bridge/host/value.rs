//! Untyped host values
//!
//! Contains the `HostValue` enum mirroring the value kinds a dynamic host
//! runtime can hand to (or receive from) the bridge, plus the introspection
//! primitives the binders are built on.

use core::fmt;

use super::HostObject;

/// A single value as seen by the host runtime
///
/// Numbers are IEEE doubles like in the host. Integers that do not fit the
/// exact-integer range used by the bridge are carried as `BigInt`.
///
/// # Examples
///
/// ```rust
/// use ass_bridge::HostValue;
///
/// let value = HostValue::from("file");
/// assert_eq!(value.as_str(), Some("file"));
/// assert_eq!(value.kind(), "string");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    /// Absent value (`undefined`)
    #[default]
    Undefined,

    /// Explicit null
    Null,

    /// Boolean
    Bool(bool),

    /// Double precision number
    Number(f64),

    /// Arbitrary precision integer
    BigInt(i128),

    /// UTF-8 string
    String(String),

    /// Ordered array
    Array(Vec<HostValue>),

    /// Key/value object with stable key order
    Object(HostObject),
}

impl HostValue {
    /// Host `typeof`-style name of this value's kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Check whether the host would treat this value as an object
    ///
    /// Arrays count as objects, `null` does not.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Look up a named property
    ///
    /// Returns `None` when the property is absent. A property that is present
    /// but holds `Undefined` is returned as `Some`.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Borrow the string payload
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean payload
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the numeric payload
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the object payload
    #[must_use]
    pub const fn as_object(&self) -> Option<&HostObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Borrow the array payload
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for HostValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u32> for HostValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<f64> for HostValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for HostValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for HostValue {
    fn from(value: Vec<Self>) -> Self {
        Self::Array(value)
    }
}

impl From<HostObject> for HostValue {
    fn from(value: HostObject) -> Self {
        Self::Object(value)
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Object(object) => write!(f, "{object}"),
        }
    }
}
