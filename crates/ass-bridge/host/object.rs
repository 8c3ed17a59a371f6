//! Ordered host objects
//!
//! `HostObject` keeps keys in insertion order. Inserting a key that already
//! exists replaces its value but keeps the original position, the same way a
//! host object behaves on property assignment.

use core::fmt;

use indexmap::IndexMap;

use super::HostValue;

/// Insertion-ordered key/value object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostObject {
    entries: IndexMap<String, HostValue>,
}

impl HostObject {
    /// Create an empty object
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, overwriting an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: HostValue) {
        self.entries.insert(key.into(), value);
    }

    /// Look up a property
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.entries.get(key)
    }

    /// Check for a property without reading it
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Property names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HostValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of properties
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the object has no properties
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, HostValue)> for HostObject {
    fn from_iter<I: IntoIterator<Item = (K, HostValue)>>(iter: I) -> Self {
        let mut object = Self::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl fmt::Display for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ",")?;
            }
            write!(f, " {key}: {value}")?;
        }
        if self.is_empty() {
            write!(f, "}}")
        } else {
            write!(f, " }}")
        }
    }
}

/// Fluent builder for structured records
///
/// Every record the bridge hands back to the host (styles, events, the
/// document, the parse result) is assembled through this builder so key order
/// is exactly the order of the `field` calls.
///
/// # Examples
///
/// ```rust
/// use ass_bridge::host::{HostValue, ObjectBuilder};
///
/// let color = ObjectBuilder::new()
///     .field("r", HostValue::from(255u32))
///     .field("g", HostValue::from(0u32))
///     .build();
///
/// let keys: Vec<_> = color.as_object().unwrap().keys().collect();
/// assert_eq!(keys, ["r", "g"]);
/// ```
#[derive(Debug, Default)]
pub struct ObjectBuilder {
    object: HostObject,
}

impl ObjectBuilder {
    /// Start an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property
    #[must_use]
    pub fn field(mut self, key: &str, value: HostValue) -> Self {
        self.object.insert(key, value);
        self
    }

    /// Append a property when a value is present
    #[must_use]
    pub fn optional_field(self, key: &str, value: Option<HostValue>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    /// Finish the record as a host value
    #[must_use]
    pub fn build(self) -> HostValue {
        HostValue::Object(self.object)
    }
}

/// Build a host object from ordered `(key, value)` pairs
///
/// Later duplicates overwrite earlier ones without moving the key.
#[must_use]
pub fn build_object<I, K>(pairs: I) -> HostValue
where
    I: IntoIterator<Item = (K, HostValue)>,
    K: Into<String>,
{
    HostValue::Object(pairs.into_iter().collect())
}
