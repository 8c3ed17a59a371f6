//! Source descriptor binding
//!
//! Decodes `{ type: "file", name }` or `{ type: "string", content }` into the
//! closed `AssSource` enum.

use crate::host::{build_object, HostValue};

use super::{BindError, Fields, Record, ToHost};

/// Accepted values of `source.type`
pub const SOURCE_TYPES: &[&str] = &["file", "string"];

/// Where the subtitle script text comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssSource {
    /// Read the script from a file on disk
    File {
        /// Path handed to the engine verbatim
        name: String,
    },

    /// Parse the script from inline text
    String {
        /// Script text
        content: String,
    },
}

impl AssSource {
    /// Source reading from the given file
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self::File { name: name.into() }
    }

    /// Source parsing the given text
    #[must_use]
    pub fn string(content: impl Into<String>) -> Self {
        Self::String {
            content: content.into(),
        }
    }

    /// Descriptor tag of this variant
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::String { .. } => "string",
        }
    }
}

impl ToHost for AssSource {
    fn to_host(&self) -> HostValue {
        match self {
            Self::File { name } => build_object([
                ("type", HostValue::from("file")),
                ("name", HostValue::from(name.as_str())),
            ]),
            Self::String { content } => build_object([
                ("type", HostValue::from("string")),
                ("content", HostValue::from(content.as_str())),
            ]),
        }
    }
}

/// Decode a source descriptor
///
/// Checks run in a fixed order: object shape, `type` presence, `type` kind,
/// then the variant's own field presence and kind.
///
/// # Errors
///
/// Returns `BindError` naming the first offending field.
///
/// # Examples
///
/// ```rust
/// use ass_bridge::{bind_source, AssSource, HostValue};
/// use serde_json::json;
///
/// let value = HostValue::from(json!({ "type": "file", "name": "movie.ass" }));
/// assert_eq!(bind_source(&value)?, AssSource::file("movie.ass"));
/// # Ok::<(), ass_bridge::BindError>(())
/// ```
pub fn bind_source(value: &HostValue) -> Result<AssSource, BindError> {
    let record = Record::argument("source", value)?;

    match record.string("type")? {
        "file" => Ok(AssSource::File {
            name: record.variant_string("name", "file")?.to_owned(),
        }),
        "string" => Ok(AssSource::String {
            content: record.variant_string("content", "string")?.to_owned(),
        }),
        _ => Err(BindError::InvalidEnumValue {
            path: record.child_path("type"),
            allowed: SOURCE_TYPES,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::ExpectedKind;
    use serde_json::json;

    fn bind(value: serde_json::Value) -> Result<AssSource, BindError> {
        bind_source(&HostValue::from(value))
    }

    #[test]
    fn binds_both_variants() {
        assert_eq!(
            bind(json!({ "type": "file", "name": "a.ass" })),
            Ok(AssSource::file("a.ass"))
        );
        assert_eq!(
            bind(json!({ "type": "string", "content": "[Script Info]\n" })),
            Ok(AssSource::string("[Script Info]\n"))
        );
    }

    #[test]
    fn rejects_non_objects() {
        assert_eq!(
            bind(json!(42)),
            Err(BindError::NotAnObject { argument: "source" })
        );
        assert_eq!(
            bind(json!(null)),
            Err(BindError::NotAnObject { argument: "source" })
        );
    }

    #[test]
    fn arrays_pass_shape_check_but_lack_type() {
        assert_eq!(
            bind(json!(["file"])),
            Err(BindError::MissingField {
                path: "source.type".to_owned(),
                condition: None,
            })
        );
    }

    #[test]
    fn type_must_be_a_string() {
        assert_eq!(
            bind(json!({ "type": 1 })),
            Err(BindError::WrongType {
                path: "source.type".to_owned(),
                expected: ExpectedKind::String,
            })
        );
    }

    #[test]
    fn unknown_type_is_an_enum_error_even_with_payload() {
        let err = bind(json!({ "type": "other", "name": "a.ass" })).unwrap_err();
        assert!(matches!(err, BindError::InvalidEnumValue { .. }));
        assert_eq!(err.path(), "source.type");
    }

    #[test]
    fn variant_fields_are_checked_after_type() {
        let err = bind(json!({ "type": "file", "content": "x" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "the 'source' argument needs to have a 'name' key, if the type is 'file'"
        );

        let err = bind(json!({ "type": "string", "content": 5 })).unwrap_err();
        assert_eq!(err.to_string(), "source.content needs to be a string");
    }

    #[test]
    fn descriptor_round_trips() {
        for source in [AssSource::file("x.ass"), AssSource::string("")] {
            assert_eq!(bind_source(&source.to_host()), Ok(source.clone()));
            assert_eq!(
                source.to_host().field("type").and_then(HostValue::as_str),
                Some(source.type_tag())
            );
        }
    }
}
