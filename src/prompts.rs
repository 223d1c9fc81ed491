/*!
 * Prompt template for script generation.
 *
 * The template describes the text layout the parser understands: a title
 * line, then labelled sections each followed by numbered visual cues.
 */

/// Prompt template with a `{topic}` placeholder.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Placeholder replaced by the requested topic.
    pub const TOPIC_PLACEHOLDER: &'static str = "{topic}";

    /// The default prompt for a 60 second short.
    pub const SHORT_VIDEO: &'static str = r#"Create a 60 second YouTube short script about {topic}.

Use these timing guidelines but DO NOT include them in your response:
- Introduction should be 10 seconds
- Main content should be 30 seconds
- Conclusion should be 10 seconds
- Call to action should be 10 seconds

Format your response EXACTLY as follows, without timing references and without repeating the section names inside the narration:

Title: [Video Title]

Introduction:
[Introduction narration]
Visual 1: [scene description]
Visual 2: [scene description]

Main Content:
[Main content narration]
Visual 1: [scene description]
Visual 2: [scene description]
Visual 3: [scene description]

Conclusion:
[Conclusion narration]
Visual 1: [scene description]
Visual 2: [scene description]

Call to Action:
[Call to action narration]
Visual 1: [scene description]"#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default short video template.
    pub fn short_video() -> Self {
        Self::new(Self::SHORT_VIDEO)
    }

    /// Whether the template mentions the topic at all.
    pub fn has_topic_placeholder(&self) -> bool {
        self.template.contains(Self::TOPIC_PLACEHOLDER)
    }

    /// Render the template for a topic.
    pub fn render(&self, topic: &str) -> String {
        self.template.replace(Self::TOPIC_PLACEHOLDER, topic.trim())
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::short_video()
    }
}
