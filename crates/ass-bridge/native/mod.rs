//! Engine result data model
//!
//! Rust mirror of the structures the parsing engine hands back for a
//! successful parse. Text fields are raw `FinalStr` spans that still need the
//! engine's normalisation pass, enum fields are raw `Ordinal`s, and event
//! margins carry an explicit "default" flag next to their payload.

pub mod enums;

pub use enums::{
    Alignment, BorderStyle, EnumFamily, EventType, FileType, LineType, Ordinal, ScriptType,
    WrapStyle,
};

use indexmap::IndexMap;

/// Raw text span as stored by the engine
///
/// Must go through `Engine::normalize` before it is shown to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FinalStr {
    raw: String,
}

impl FinalStr {
    /// Wrap raw engine text
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Raw, un-normalised text
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Length of the raw span in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Check for a zero-length span
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl From<&str> for FinalStr {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Event margin override
///
/// `is_default` decides between the "default" sentinel and `value`; a zero
/// `value` is a legitimate explicit margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarginValue {
    /// No override, use the style's margin
    pub is_default: bool,

    /// Override in pixels, meaningful only when `is_default` is false
    pub value: u64,
}

impl MarginValue {
    /// Explicit margin override
    #[must_use]
    pub const fn explicit(value: u64) -> Self {
        Self {
            is_default: false,
            value,
        }
    }

    /// Defer to the style's margin
    #[must_use]
    pub const fn default_margin() -> Self {
        Self {
            is_default: true,
            value: 0,
        }
    }
}

/// RGBA colour with alpha as stored by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AssColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl AssColor {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Timestamp in `H:MM:SS.CC` components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AssTime {
    pub hour: u32,
    pub min: u8,
    pub sec: u8,
    pub hundred: u8,
}

impl AssTime {
    #[must_use]
    pub const fn new(hour: u32, min: u8, sec: u8, hundred: u8) -> Self {
        Self {
            hour,
            min,
            sec,
            hundred,
        }
    }
}

/// Parsed `[Script Info]` section
#[derive(Debug, Clone, PartialEq)]
pub struct AssScriptInfo {
    pub title: FinalStr,
    pub original_script: FinalStr,
    pub original_translation: FinalStr,
    pub original_editing: FinalStr,
    pub original_timing: FinalStr,
    pub synch_point: FinalStr,
    pub script_updated_by: FinalStr,
    pub update_details: FinalStr,
    pub script_type: Ordinal<ScriptType>,
    pub collisions: FinalStr,
    pub play_res_y: u64,
    pub play_res_x: u64,
    pub play_depth: FinalStr,
    pub timer: FinalStr,
    pub wrap_style: Ordinal<WrapStyle>,
    pub scaled_border_and_shadow: bool,
    pub video_aspect_ratio: u64,
    pub video_zoom: u64,
    pub ycbcr_matrix: FinalStr,
}

impl Default for AssScriptInfo {
    fn default() -> Self {
        Self {
            title: FinalStr::default(),
            original_script: FinalStr::default(),
            original_translation: FinalStr::default(),
            original_editing: FinalStr::default(),
            original_timing: FinalStr::default(),
            synch_point: FinalStr::default(),
            script_updated_by: FinalStr::default(),
            update_details: FinalStr::default(),
            script_type: Ordinal::of(ScriptType::Unknown),
            collisions: FinalStr::default(),
            play_res_y: 0,
            play_res_x: 0,
            play_depth: FinalStr::default(),
            timer: FinalStr::default(),
            wrap_style: Ordinal::of(WrapStyle::Smart),
            scaled_border_and_shadow: false,
            video_aspect_ratio: 0,
            video_zoom: 0,
            ycbcr_matrix: FinalStr::default(),
        }
    }
}

/// One line of the styles section
#[derive(Debug, Clone, PartialEq)]
pub struct AssStyleEntry {
    pub name: FinalStr,
    pub fontname: FinalStr,
    pub fontsize: u64,
    pub primary_colour: AssColor,
    pub secondary_colour: AssColor,
    pub outline_colour: AssColor,
    pub back_colour: AssColor,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
    pub scale_x: u64,
    pub scale_y: u64,
    pub spacing: f64,
    pub angle: f64,
    pub border_style: Ordinal<BorderStyle>,
    pub outline: f64,
    pub shadow: f64,
    pub alignment: Ordinal<Alignment>,
    pub margin_l: u64,
    pub margin_r: u64,
    pub margin_v: u64,
    pub encoding: u64,
}

/// One line of the `[Events]` section
#[derive(Debug, Clone, PartialEq)]
pub struct AssEventEntry {
    pub event_type: Ordinal<EventType>,
    pub layer: u64,
    pub start: AssTime,
    pub end: AssTime,
    pub style: FinalStr,
    pub name: FinalStr,
    pub margin_l: MarginValue,
    pub margin_r: MarginValue,
    pub margin_v: MarginValue,
    pub effect: FinalStr,
    pub text: FinalStr,
}

/// Fields of one unrecognised section, in source order
pub type ExtraSection = IndexMap<String, FinalStr>;

/// Unrecognised sections keyed by section name
pub type ExtraSections = IndexMap<String, ExtraSection>;

/// Properties of the source file itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileProps {
    pub line_type: Ordinal<LineType>,
    pub file_type: Ordinal<FileType>,
}

impl Default for FileProps {
    fn default() -> Self {
        Self {
            line_type: Ordinal::of(LineType::Lf),
            file_type: Ordinal::of(FileType::Utf8),
        }
    }
}

/// Complete document produced by a successful parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssResult {
    pub script_info: AssScriptInfo,
    pub styles: Vec<AssStyleEntry>,
    pub events: Vec<AssEventEntry>,
    pub extra_sections: ExtraSections,
    pub file_props: FileProps,
}
