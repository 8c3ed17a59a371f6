//! Document encoding
//!
//! Walks a parsed `AssResult` and builds the host document. Key order in every
//! record matches the field order the host-side type definitions use.

use crate::engine::Engine;
use crate::host::{HostObject, HostValue, ObjectBuilder};
use crate::native::{
    AssEventEntry, AssResult, AssScriptInfo, AssStyleEntry, ExtraSection, ExtraSections, FileProps,
    FinalStr,
};

use super::{
    encode_bool, encode_color, encode_enum, encode_f64, encode_margin, encode_size, encode_text,
    encode_time, EncodeError,
};

/// Encodes engine documents, normalising text through the engine
pub struct DocumentEncoder<'e, E: Engine> {
    engine: &'e E,
}

impl<'e, E: Engine> DocumentEncoder<'e, E> {
    /// Create an encoder backed by `engine`'s normalisation primitive
    #[must_use]
    pub const fn new(engine: &'e E) -> Self {
        Self { engine }
    }

    fn text(&self, text: &FinalStr) -> HostValue {
        encode_text(self.engine, text)
    }

    /// Encode a complete document
    ///
    /// # Errors
    ///
    /// Returns `EncodeError` if any enum ordinal in the document is unmapped.
    pub fn document(&self, result: &AssResult) -> Result<HostValue, EncodeError> {
        Ok(ObjectBuilder::new()
            .field("script_info", self.script_info(&result.script_info)?)
            .field("styles", self.styles(&result.styles)?)
            .field("events", self.events(&result.events)?)
            .field("extra_sections", self.extra_sections(&result.extra_sections))
            .field("file_props", file_props(&result.file_props)?)
            .build())
    }

    /// Encode the `[Script Info]` record
    ///
    /// # Errors
    ///
    /// Fails on an unmapped script type or wrap style ordinal.
    pub fn script_info(&self, info: &AssScriptInfo) -> Result<HostValue, EncodeError> {
        Ok(ObjectBuilder::new()
            .field("title", self.text(&info.title))
            .field("original_script", self.text(&info.original_script))
            .field("original_translation", self.text(&info.original_translation))
            .field("original_editing", self.text(&info.original_editing))
            .field("original_timing", self.text(&info.original_timing))
            .field("synch_point", self.text(&info.synch_point))
            .field("script_updated_by", self.text(&info.script_updated_by))
            .field("update_details", self.text(&info.update_details))
            .field("script_type", encode_enum(info.script_type)?)
            .field("collisions", self.text(&info.collisions))
            .field("play_res_y", encode_size(info.play_res_y))
            .field("play_res_x", encode_size(info.play_res_x))
            .field("play_depth", self.text(&info.play_depth))
            .field("timer", self.text(&info.timer))
            .field("wrap_style", encode_enum(info.wrap_style)?)
            .field(
                "scaled_border_and_shadow",
                encode_bool(info.scaled_border_and_shadow),
            )
            .field("video_aspect_ratio", encode_size(info.video_aspect_ratio))
            .field("video_zoom", encode_size(info.video_zoom))
            .field("ycbcr_matrix", self.text(&info.ycbcr_matrix))
            .build())
    }

    /// Encode one style line
    ///
    /// # Errors
    ///
    /// Fails on an unmapped border style or alignment ordinal.
    pub fn style(&self, style: &AssStyleEntry) -> Result<HostValue, EncodeError> {
        Ok(ObjectBuilder::new()
            .field("name", self.text(&style.name))
            .field("fontname", self.text(&style.fontname))
            .field("fontsize", encode_size(style.fontsize))
            .field("primary_colour", encode_color(&style.primary_colour))
            .field("secondary_colour", encode_color(&style.secondary_colour))
            .field("outline_colour", encode_color(&style.outline_colour))
            .field("back_colour", encode_color(&style.back_colour))
            .field("bold", encode_bool(style.bold))
            .field("italic", encode_bool(style.italic))
            .field("underline", encode_bool(style.underline))
            .field("strike_out", encode_bool(style.strike_out))
            .field("scale_x", encode_size(style.scale_x))
            .field("scale_y", encode_size(style.scale_y))
            .field("spacing", encode_f64(style.spacing))
            .field("angle", encode_f64(style.angle))
            .field("border_style", encode_enum(style.border_style)?)
            .field("outline", encode_f64(style.outline))
            .field("shadow", encode_f64(style.shadow))
            .field("alignment", encode_enum(style.alignment)?)
            .field("margin_l", encode_size(style.margin_l))
            .field("margin_r", encode_size(style.margin_r))
            .field("margin_v", encode_size(style.margin_v))
            .field("encoding", encode_size(style.encoding))
            .build())
    }

    /// Encode one event line
    ///
    /// # Errors
    ///
    /// Fails on an unmapped event type ordinal.
    pub fn event(&self, event: &AssEventEntry) -> Result<HostValue, EncodeError> {
        Ok(ObjectBuilder::new()
            .field("type", encode_enum(event.event_type)?)
            .field("layer", encode_size(event.layer))
            .field("start", encode_time(&event.start))
            .field("end", encode_time(&event.end))
            .field("style", self.text(&event.style))
            .field("name", self.text(&event.name))
            .field("margin_l", encode_margin(&event.margin_l))
            .field("margin_r", encode_margin(&event.margin_r))
            .field("margin_v", encode_margin(&event.margin_v))
            .field("effect", self.text(&event.effect))
            .field("text", self.text(&event.text))
            .build())
    }

    fn styles(&self, styles: &[AssStyleEntry]) -> Result<HostValue, EncodeError> {
        styles
            .iter()
            .map(|style| self.style(style))
            .collect::<Result<Vec<_>, _>>()
            .map(HostValue::Array)
    }

    fn events(&self, events: &[AssEventEntry]) -> Result<HostValue, EncodeError> {
        events
            .iter()
            .map(|event| self.event(event))
            .collect::<Result<Vec<_>, _>>()
            .map(HostValue::Array)
    }

    /// Encode unrecognised sections as `{ [section]: { [field]: string } }`
    #[must_use]
    pub fn extra_sections(&self, sections: &ExtraSections) -> HostValue {
        let object: HostObject = sections
            .iter()
            .map(|(name, section)| (name.clone(), self.extra_section(section)))
            .collect();
        HostValue::Object(object)
    }

    fn extra_section(&self, section: &ExtraSection) -> HostValue {
        let object: HostObject = section
            .iter()
            .map(|(key, value)| (key.clone(), self.text(value)))
            .collect();
        HostValue::Object(object)
    }
}

/// Encode file-level properties
///
/// # Errors
///
/// Fails on an unmapped line type or file type ordinal.
pub fn file_props(props: &FileProps) -> Result<HostValue, EncodeError> {
    Ok(ObjectBuilder::new()
        .field("line_type", encode_enum(props.line_type)?)
        .field("file_type", encode_enum(props.file_type)?)
        .build())
}
