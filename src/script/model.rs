/*!
 * Document model for generated video scripts.
 *
 * A script is a title plus an ordered list of narration sections, each
 * carrying the visual-cue descriptions that belong to it. Both types are
 * plain values that serialize to the JSON shape returned to clients.
 */

use serde::{Deserialize, Serialize};

use crate::errors::ScriptError;

/// One narrative block of a script with its visual cues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Narration text for this block
    pub text: String,

    /// Visual-cue descriptions in reading order
    #[serde(default)]
    pub scenes: Vec<String>,
}

impl Section {
    /// Create a section with narration text and no scenes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scenes: Vec::new(),
        }
    }

    /// Create a section with narration text and scenes.
    pub fn with_scenes(text: impl Into<String>, scenes: Vec<String>) -> Self {
        Self {
            text: text.into(),
            scenes,
        }
    }

    /// Whether the narration is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The validated result of parsing a generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDocument {
    /// Video title
    pub title: String,

    /// Sections in playback order
    pub sections: Vec<Section>,
}

impl ScriptDocument {
    /// Create a document from a title and its sections.
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// All section texts joined with single spaces, ready for speech synthesis.
    pub fn narration(&self) -> String {
        let mut full_text = String::new();
        for section in &self.sections {
            full_text.push_str(&section.text);
            full_text.push(' ');
        }
        full_text.trim().to_string()
    }

    /// Total number of scenes across all sections.
    pub fn scene_count(&self) -> usize {
        self.sections.iter().map(|s| s.scenes.len()).sum()
    }

    /// Check the document invariants a successful parse must uphold.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.sections.is_empty() {
            return Err(ScriptError::EmptyDocument);
        }
        Ok(())
    }
}
