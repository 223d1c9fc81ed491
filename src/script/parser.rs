/*!
 * Parser turning generated script text into a `ScriptDocument`.
 *
 * The generator is asked for a fixed template (a title line, then labelled
 * sections each followed by "Visual N:" lines) but follows it loosely. The
 * parser scans the text line by line with a two-state machine: either no
 * section is open and only headers matter, or a section is open and every
 * line is a header, a scene cue or more narration for it.
 *
 * Parsing never fails. Text without any recognizable structure becomes a
 * single section holding the whole input.
 */

use log::{debug, warn};
use once_cell::sync::Lazy;

use super::model::{ScriptDocument, Section};
use crate::errors::ScriptError;

/// Labels that start a new section, matched case-insensitively as prefixes.
///
/// `Section` carries no colon and therefore also matches words such as
/// "Sectional" at the start of a line.
pub const HEADER_LABELS: [&str; 6] = [
    "Title:",
    "Introduction:",
    "Section",
    "Main Content:",
    "Conclusion:",
    "Call to Action:",
];

/// Label of the header line that carries the video title.
pub const TITLE_LABEL: &str = "Title:";

/// Title used when the first line holds nothing but the label.
pub const UNTITLED: &str = "Untitled";

// @const: Lowercased header labels
static HEADER_PREFIXES: Lazy<Vec<String>> =
    Lazy::new(|| HEADER_LABELS.iter().map(|label| label.to_lowercase()).collect());

static TITLE_PREFIX: Lazy<String> = Lazy::new(|| TITLE_LABEL.to_lowercase());

/// Classification of a single non-empty, trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts a new section
    Header,
    /// Visual cue for the open section
    Scene,
    /// More narration for the open section
    Continuation,
}

// @struct: Scan state
enum ParserState {
    NoSectionOpen,
    SectionOpen(Section),
}

/// Stateless parser for generated scripts.
///
/// Each call to [`ScriptParser::parse`] keeps its working state on the
/// stack, so one parser can be shared freely between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptParser;

impl ScriptParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw generated text into a script document.
    ///
    /// The title comes from the first non-empty line; the sections come
    /// from the state machine described in the module docs.
    pub fn parse(&self, raw_text: &str) -> ScriptDocument {
        let title = Self::extract_title(raw_text);
        let sections = self.parse_sections(raw_text);
        debug!("Parsed script '{}' with {} section(s)", title, sections.len());
        ScriptDocument::new(title, sections)
    }

    /// Parse generator output, rejecting empty text up front.
    ///
    /// Fails with `EmptyUpstreamResponse` for empty or whitespace-only
    /// input, and with `EmptyDocument` should a parse ever come back
    /// without sections.
    pub fn parse_checked(&self, raw_text: &str) -> Result<ScriptDocument, ScriptError> {
        if raw_text.trim().is_empty() {
            return Err(ScriptError::EmptyUpstreamResponse);
        }

        let document = self.parse(raw_text);
        document.validate()?;
        Ok(document)
    }

    /// Derive the title from the first non-empty line of the raw text.
    ///
    /// A leading `Title:` label (exact case) is stripped. Falls back to
    /// [`UNTITLED`] when nothing is left.
    pub fn extract_title(raw_text: &str) -> String {
        let first_line = raw_text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();

        let title = first_line
            .strip_prefix(TITLE_LABEL)
            .unwrap_or(first_line)
            .trim();

        if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title.to_string()
        }
    }

    /// Split raw text into sections.
    ///
    /// Always returns at least one section: when no header produced
    /// narration, the whole input becomes the only section.
    pub fn parse_sections(&self, raw_text: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut state = ParserState::NoSectionOpen;

        let lines = raw_text.lines().map(str::trim).filter(|line| !line.is_empty());

        for line in lines {
            state = match (state, Self::classify(line)) {
                (ParserState::NoSectionOpen, LineKind::Header) => Self::open_section(line),
                (ParserState::SectionOpen(current), LineKind::Header) => {
                    Self::close_section(current, &mut sections);
                    Self::open_section(line)
                }
                (ParserState::SectionOpen(mut current), LineKind::Scene) => {
                    if let Some(description) = Self::scene_description(line) {
                        debug!("Added scene: {}", description);
                        current.scenes.push(description);
                    }
                    ParserState::SectionOpen(current)
                }
                (ParserState::SectionOpen(mut current), LineKind::Continuation) => {
                    current.text.push('\n');
                    current.text.push_str(line);
                    ParserState::SectionOpen(current)
                }
                (ParserState::NoSectionOpen, _) => {
                    debug!("Ignoring line outside of any section: {}", line);
                    ParserState::NoSectionOpen
                }
            };
        }

        if let ParserState::SectionOpen(current) = state {
            Self::close_section(current, &mut sections);
        }

        if sections.is_empty() {
            warn!("No script sections recognized, using the whole text as one section");
            sections.push(Section::new(raw_text));
        }

        sections
    }

    /// Classify a trimmed line, headers first.
    ///
    /// Scene and continuation lines only take effect while a section is
    /// open; the caller drops them otherwise.
    pub fn classify(line: &str) -> LineKind {
        let lower = line.to_lowercase();

        if HEADER_PREFIXES.iter().any(|prefix| lower.starts_with(prefix.as_str())) {
            LineKind::Header
        } else if lower.starts_with("visual")
            || lower.starts_with("scene")
            || lower.contains("visual:")
            || lower.contains("scene:")
        {
            LineKind::Scene
        } else {
            LineKind::Continuation
        }
    }

    // A title header opens an empty section; its text is the document title.
    fn open_section(line: &str) -> ParserState {
        if line.to_lowercase().starts_with(TITLE_PREFIX.as_str()) {
            debug!("Title line: {}", line);
            return ParserState::SectionOpen(Section::new(""));
        }

        let text = match line.split_once(':') {
            Some((_, rest)) => rest.trim(),
            None => line,
        };

        debug!("Starting new section: {}", line);
        ParserState::SectionOpen(Section::new(text))
    }

    fn close_section(section: Section, sections: &mut Vec<Section>) {
        if section.is_blank() {
            debug!("Dropping section without narration ({} scene(s))", section.scenes.len());
            return;
        }

        sections.push(Section {
            text: section.text.trim().to_string(),
            scenes: section.scenes,
        });
    }

    // "Visual 1: x" and "Visual: x" both yield "x"; no colon yields nothing.
    fn scene_description(line: &str) -> Option<String> {
        line.split_once(':').map(|(_, rest)| rest.trim().to_string())
    }
}
