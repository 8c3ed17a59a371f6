//! Strictness settings binding
//!
//! The strictness flags decide how permissive the engine is, so every flag is
//! mandatory. A missing or mistyped flag is a hard failure naming its full
//! dotted path; nothing is ever defaulted during binding.

use thiserror::Error;

use crate::host::{build_object, HostValue};

use super::{BindError, Fields, Record, ToHost};

/// Strictness toggles for the `[Script Info]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptInfoStrictSettings {
    /// Accept a key appearing more than once
    pub allow_duplicate_fields: bool,

    /// Accept a script without a `ScriptType` line
    pub allow_missing_script_type: bool,
}

/// Strictness toggles for the whole script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrictSettings {
    /// `[Script Info]` specific toggles
    pub script_info: ScriptInfoStrictSettings,

    /// Accept fields not defined by the format
    pub allow_additional_fields: bool,

    /// Accept numbers that have to be truncated to fit their field
    pub allow_number_truncating: bool,

    /// Accept files whose text encoding cannot be detected
    pub allow_unrecognized_file_encoding: bool,
}

/// Settings passed by value into one engine call
///
/// # Examples
///
/// ```rust
/// use ass_bridge::{bind_settings, ParseSettings, ToHost};
///
/// let settings = ParseSettings::strict();
/// assert_eq!(bind_settings(&settings.to_host())?, settings);
/// # Ok::<(), ass_bridge::BindError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseSettings {
    /// Strictness toggles
    pub strict_settings: StrictSettings,
}

impl ParseSettings {
    /// Every toggle set to the same value
    #[must_use]
    pub const fn uniform(allow: bool) -> Self {
        Self {
            strict_settings: StrictSettings {
                script_info: ScriptInfoStrictSettings {
                    allow_duplicate_fields: allow,
                    allow_missing_script_type: allow,
                },
                allow_additional_fields: allow,
                allow_number_truncating: allow,
                allow_unrecognized_file_encoding: allow,
            },
        }
    }

    /// Reject everything the engine can be strict about
    #[must_use]
    pub const fn strict() -> Self {
        Self::uniform(false)
    }

    /// Accept everything the engine can tolerate
    #[must_use]
    pub const fn non_strict() -> Self {
        Self::uniform(true)
    }

    /// Load settings from JSON text
    ///
    /// The JSON is decoded with the same binder as host arguments, so a
    /// configuration file gets exactly the same validation and messages.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Json` for malformed JSON and
    /// `SettingsError::Bind` for a well-formed but invalid descriptor.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(bind_settings(&HostValue::from(value))?)
    }
}

impl ToHost for ParseSettings {
    fn to_host(&self) -> HostValue {
        let strict = &self.strict_settings;
        let script_info = build_object([
            (
                "allow_duplicate_fields",
                HostValue::Bool(strict.script_info.allow_duplicate_fields),
            ),
            (
                "allow_missing_script_type",
                HostValue::Bool(strict.script_info.allow_missing_script_type),
            ),
        ]);
        let strict_settings = build_object([
            ("script_info", script_info),
            (
                "allow_additional_fields",
                HostValue::Bool(strict.allow_additional_fields),
            ),
            (
                "allow_number_truncating",
                HostValue::Bool(strict.allow_number_truncating),
            ),
            (
                "allow_unrecognized_file_encoding",
                HostValue::Bool(strict.allow_unrecognized_file_encoding),
            ),
        ]);
        build_object([("strict_settings", strict_settings)])
    }
}

/// Failure loading settings from a configuration text
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Text is not valid JSON
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON does not describe valid settings
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Decode a settings descriptor
///
/// Fields are read in this order: `strict_settings`, `script_info`,
/// `allow_duplicate_fields`, `allow_missing_script_type`,
/// `allow_additional_fields`, `allow_number_truncating`,
/// `allow_unrecognized_file_encoding`.
///
/// # Errors
///
/// Returns `BindError` naming the first offending field.
pub fn bind_settings(value: &HostValue) -> Result<ParseSettings, BindError> {
    let record = Record::argument("settings", value)?;
    let strict = record.object("strict_settings")?;

    let script_info = {
        let record = strict.object("script_info")?;
        ScriptInfoStrictSettings {
            allow_duplicate_fields: record.boolean("allow_duplicate_fields")?,
            allow_missing_script_type: record.boolean("allow_missing_script_type")?,
        }
    };

    let strict_settings = StrictSettings {
        script_info,
        allow_additional_fields: strict.boolean("allow_additional_fields")?,
        allow_number_truncating: strict.boolean("allow_number_truncating")?,
        allow_unrecognized_file_encoding: strict.boolean("allow_unrecognized_file_encoding")?,
    };

    Ok(ParseSettings { strict_settings })
}
