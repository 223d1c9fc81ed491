/*!
 * Mock collaborator implementations for testing.
 *
 * - `MockGenerator::working(text)` - Always returns the given raw text
 * - `MockGenerator::empty()` - Answers with an empty string
 * - `MockGenerator::failing()` - Always fails with an error
 * - `MockSynthesizer::working()` - Writes a placeholder audio file
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{SpeechSynthesizer, TextGenerator};

/// Behavior mode for the mock generator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with the given text
    Working(String),
    /// Returns an empty response
    Empty,
    /// Always fails with an error
    Failing,
    /// Succeeds after a delay (for timeout testing)
    Slow { delay_ms: u64, text: String },
}

/// Mock text generator
#[derive(Debug, Clone)]
pub struct MockGenerator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of calls made, shared between clones
    request_count: Arc<AtomicUsize>,
    /// Last prompt received
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockGenerator {
    /// Create a new mock generator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a generator that always returns `text`
    pub fn working(text: &str) -> Self {
        Self::new(MockBehavior::Working(text.to_string()))
    }

    /// Create a generator that returns an empty response
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a generator that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Number of calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Prompt received by the last call
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(prompt.to_string());

        match &self.behavior {
            MockBehavior::Working(text) => Ok(text.clone()),
            MockBehavior::Empty => Ok(String::new()),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Simulated generator failure".to_string(),
            )),
            MockBehavior::Slow { delay_ms, text } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(text.clone())
            }
        }
    }
}

/// Mock speech synthesizer that records what it was asked to speak
#[derive(Debug, Clone, Default)]
pub struct MockSynthesizer {
    /// Fail every call instead of writing a file
    fail: bool,
    /// (narration, output path) of every call
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl MockSynthesizer {
    /// Create a synthesizer that writes placeholder audio
    pub fn working() -> Self {
        Self::default()
    }

    /// Create a synthesizer that always errors
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Recorded calls
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), ProviderError> {
        self.calls
            .lock()
            .push((text.to_string(), output_path.to_path_buf()));

        if self.fail {
            return Err(ProviderError::RequestFailed(
                "Simulated synthesis failure".to_string(),
            ));
        }

        tokio::fs::write(output_path, b"ID3mock").await?;
        Ok(())
    }
}
