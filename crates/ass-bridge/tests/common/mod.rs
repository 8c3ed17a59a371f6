//! Scripted parsing engine for integration tests
//!
//! `FakeEngine` implements the `Engine` seam with a tiny line-based reader
//! (enough to tell sections apart) or with canned results, and counts every
//! interaction the bridge has with it: parses, releases, normalisations and
//! live text buffers.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use ass_bridge::native::{
    AssEventEntry, AssResult, AssScriptInfo, AssStyleEntry, AssTime, EventType, ExtraSection,
    FileProps, FileType, FinalStr, LineType, MarginValue, Ordinal, ScriptType,
};
use ass_bridge::{AssSource, Engine, ParseSettings};

pub const FAKE_VERSION: &str = "0.0.3";
pub const FAKE_COMMIT: &str = "cd76a58fa443";

/// What the engine does when asked to parse
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Read the source with the line-based reader
    Script,
    /// Return this document regardless of input
    Fixed(AssResult),
    /// Report a parse failure with this message
    Fail(Option<String>),
    /// Return no handle (allocation failure)
    NoHandle,
    /// Report success but expose no document
    Hollow,
}

/// Interaction counters shared with the test body
#[derive(Debug, Default)]
pub struct Counters {
    pub parses: Cell<usize>,
    pub frees: Cell<usize>,
    pub normalizations: Cell<usize>,
    pub texts_allocated: Cell<usize>,
    pub texts_released: Cell<usize>,
    pub live_handles: RefCell<HashSet<usize>>,
    pub last_settings: Cell<Option<ParseSettings>>,
}

impl Counters {
    pub fn live_texts(&self) -> usize {
        self.texts_allocated.get() - self.texts_released.get()
    }
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

/// Engine-owned text; dropping it counts as a release
pub struct FakeText {
    text: String,
    counters: Rc<Counters>,
}

impl AsRef<str> for FakeText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl Drop for FakeText {
    fn drop(&mut self) {
        bump(&self.counters.texts_released);
    }
}

#[derive(Debug, Clone)]
pub struct FakeWarning(pub String);

#[derive(Debug)]
pub struct FakeHandle {
    id: usize,
    outcome: Result<Option<AssResult>, Option<String>>,
    warnings: Vec<FakeWarning>,
}

pub struct FakeEngine {
    behavior: Behavior,
    files: HashMap<String, String>,
    warnings: Vec<FakeWarning>,
    next_id: Cell<usize>,
    pub counters: Rc<Counters>,
}

impl FakeEngine {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            files: HashMap::new(),
            warnings: Vec::new(),
            next_id: Cell::new(0),
            counters: Rc::new(Counters::default()),
        }
    }

    pub fn script() -> Self {
        Self::new(Behavior::Script)
    }

    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_owned(), content.to_owned());
        self
    }

    /// Extra warnings attached to every handle
    pub fn with_warning(mut self, message: &str) -> Self {
        self.warnings.push(FakeWarning(message.to_owned()));
        self
    }

    fn text(&self, text: String) -> FakeText {
        bump(&self.counters.texts_allocated);
        FakeText {
            text,
            counters: Rc::clone(&self.counters),
        }
    }

    fn handle(
        &self,
        outcome: Result<Option<AssResult>, Option<String>>,
        mut warnings: Vec<FakeWarning>,
    ) -> FakeHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.counters.live_handles.borrow_mut().insert(id);
        warnings.extend(self.warnings.iter().cloned());
        FakeHandle {
            id,
            outcome,
            warnings,
        }
    }
}

impl Engine for FakeEngine {
    type Handle = FakeHandle;
    type Warning = FakeWarning;
    type Text = FakeText;

    fn parse(&self, source: &AssSource, settings: ParseSettings) -> Option<FakeHandle> {
        bump(&self.counters.parses);
        self.counters.last_settings.set(Some(settings));

        match &self.behavior {
            Behavior::Script => {
                let text = match source {
                    AssSource::String { content } => content.clone(),
                    AssSource::File { name } => match self.files.get(name) {
                        Some(content) => content.clone(),
                        None => {
                            return Some(self.handle(
                                Err(Some(format!("could not open file '{name}'"))),
                                Vec::new(),
                            ))
                        }
                    },
                };
                let (outcome, warnings) = read_script(&text, settings);
                Some(self.handle(outcome.map(Some).map_err(Some), warnings))
            }
            Behavior::Fixed(document) => Some(self.handle(Ok(Some(document.clone())), Vec::new())),
            Behavior::Fail(message) => Some(self.handle(Err(message.clone()), Vec::new())),
            Behavior::NoHandle => None,
            Behavior::Hollow => Some(self.handle(Ok(None), Vec::new())),
        }
    }

    fn result_is_error(&self, handle: &FakeHandle) -> bool {
        handle.outcome.is_err()
    }

    fn result_error(&self, handle: &FakeHandle) -> Option<FakeText> {
        match &handle.outcome {
            Err(Some(message)) => Some(self.text(message.clone())),
            _ => None,
        }
    }

    fn result_value<'h>(&self, handle: &'h FakeHandle) -> Option<&'h AssResult> {
        handle.outcome.as_ref().ok().and_then(Option::as_ref)
    }

    fn free_result(&self, handle: FakeHandle) {
        let released = self.counters.live_handles.borrow_mut().remove(&handle.id);
        assert!(released, "handle {} released twice", handle.id);
        bump(&self.counters.frees);
    }

    fn diagnostics<'h>(&self, handle: &'h FakeHandle) -> &'h [FakeWarning] {
        &handle.warnings
    }

    fn warning_message(&self, warning: &FakeWarning) -> FakeText {
        self.text(warning.0.clone())
    }

    fn normalize(&self, text: &FinalStr) -> FakeText {
        assert!(!text.is_empty(), "normalize called on an empty span");
        bump(&self.counters.normalizations);
        self.text(text.raw().replace("\\N", "\n"))
    }

    fn version(&self) -> &str {
        FAKE_VERSION
    }

    fn commit_hash(&self) -> &str {
        FAKE_COMMIT
    }
}

/// Minimal section reader standing in for the real grammar
fn read_script(
    text: &str,
    settings: ParseSettings,
) -> (Result<AssResult, String>, Vec<FakeWarning>) {
    let mut warnings = Vec::new();
    let mut result = AssResult {
        file_props: FileProps {
            line_type: Ordinal::of(detect_line_type(text)),
            file_type: Ordinal::of(FileType::Utf8),
        },
        ..AssResult::default()
    };
    let mut section: Option<String> = None;
    let mut saw_script_type = false;

    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with(';') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(name.to_owned());
            continue;
        }
        let Some(current) = section.as_deref() else {
            return (
                Err(format!(
                    "expected a section header like [Script Info] at line {}",
                    index + 1
                )),
                warnings,
            );
        };
        let Some((key, value)) = line.split_once(':') else {
            warnings.push(FakeWarning(format!("ignored line {}: no key", index + 1)));
            continue;
        };
        let value = value.trim_start();

        match current {
            "Script Info" => {
                saw_script_type |= key == "ScriptType";
                read_script_info(&mut result.script_info, key, value, &mut warnings);
            }
            "V4+ Styles" if key == "Style" => result.styles.push(read_style(value)),
            "Events" if key == "Dialogue" || key == "Comment" => {
                result.events.push(read_event(key, value));
            }
            "V4+ Styles" | "Events" => {}
            other => {
                result
                    .extra_sections
                    .entry(other.to_owned())
                    .or_insert_with(ExtraSection::new)
                    .insert(key.to_owned(), FinalStr::new(value));
            }
        }
    }

    if !saw_script_type && !settings.strict_settings.script_info.allow_missing_script_type {
        warnings.push(FakeWarning("missing ScriptType".to_owned()));
    }

    (Ok(result), warnings)
}

fn detect_line_type(text: &str) -> LineType {
    if text.contains("\r\n") {
        LineType::CrLf
    } else if text.contains('\r') {
        LineType::Cr
    } else {
        LineType::Lf
    }
}

fn read_script_info(
    info: &mut AssScriptInfo,
    key: &str,
    value: &str,
    warnings: &mut Vec<FakeWarning>,
) {
    match key {
        "Title" => info.title = FinalStr::new(value),
        "ScriptType" => {
            info.script_type = Ordinal::of(match value {
                "v4.00+" => ScriptType::V4Plus,
                "v4.00" => ScriptType::V4,
                _ => ScriptType::Unknown,
            });
        }
        "PlayResX" => info.play_res_x = value.parse().unwrap_or_default(),
        "PlayResY" => info.play_res_y = value.parse().unwrap_or_default(),
        other => warnings.push(FakeWarning(format!("unknown script info key '{other}'"))),
    }
}

fn read_style(value: &str) -> AssStyleEntry {
    let fields: Vec<&str> = value.split(',').collect();
    let field = |index: usize| fields.get(index).copied().unwrap_or_default();
    AssStyleEntry {
        name: FinalStr::new(field(0)),
        fontname: FinalStr::new(field(1)),
        fontsize: field(2).parse().unwrap_or_default(),
        ..sample_style()
    }
}

fn read_event(kind: &str, value: &str) -> AssEventEntry {
    let fields: Vec<&str> = value.splitn(10, ',').collect();
    let field = |index: usize| fields.get(index).copied().unwrap_or_default();
    let margin = |index: usize| match field(index) {
        "" => MarginValue::default_margin(),
        raw => MarginValue::explicit(raw.parse().unwrap_or_default()),
    };
    AssEventEntry {
        event_type: Ordinal::of(if kind == "Comment" {
            EventType::Comment
        } else {
            EventType::Dialogue
        }),
        layer: field(0).parse().unwrap_or_default(),
        start: read_time(field(1)),
        end: read_time(field(2)),
        style: FinalStr::new(field(3)),
        name: FinalStr::new(field(4)),
        margin_l: margin(5),
        margin_r: margin(6),
        margin_v: margin(7),
        effect: FinalStr::new(field(8)),
        text: FinalStr::new(field(9)),
    }
}

fn read_time(value: &str) -> AssTime {
    let mut parts = value.split([':', '.']).map(|part| part.parse().unwrap_or(0u32));
    let mut next = || parts.next().unwrap_or(0);
    let hour = next();
    let min = next();
    let sec = next();
    let hundred = next();
    AssTime::new(
        hour,
        u8::try_from(min).unwrap_or(0),
        u8::try_from(sec).unwrap_or(0),
        u8::try_from(hundred).unwrap_or(0),
    )
}

/// A fully populated style used as a fixture
pub fn sample_style() -> AssStyleEntry {
    use ass_bridge::native::{Alignment, AssColor, BorderStyle};

    AssStyleEntry {
        name: FinalStr::new("Default"),
        fontname: FinalStr::new("Arial"),
        fontsize: 20,
        primary_colour: AssColor::new(255, 255, 255, 0),
        secondary_colour: AssColor::new(255, 0, 0, 0),
        outline_colour: AssColor::new(0, 0, 0, 0),
        back_colour: AssColor::new(0, 0, 0, 128),
        bold: false,
        italic: true,
        underline: false,
        strike_out: false,
        scale_x: 100,
        scale_y: 100,
        spacing: 0.5,
        angle: 0.0,
        border_style: Ordinal::of(BorderStyle::Outline),
        outline: 2.0,
        shadow: 0.0,
        alignment: Ordinal::of(Alignment::BottomCenter),
        margin_l: 10,
        margin_r: 10,
        margin_v: 10,
        encoding: 1,
    }
}

/// A fully populated event used as a fixture
pub fn sample_event() -> AssEventEntry {
    AssEventEntry {
        event_type: Ordinal::of(EventType::Dialogue),
        layer: 0,
        start: AssTime::new(0, 0, 1, 0),
        end: AssTime::new(0, 0, 5, 50),
        style: FinalStr::new("Default"),
        name: FinalStr::default(),
        margin_l: MarginValue::explicit(0),
        margin_r: MarginValue::default_margin(),
        margin_v: MarginValue::explicit(15),
        effect: FinalStr::default(),
        text: FinalStr::new("Hello\\Nworld"),
    }
}
