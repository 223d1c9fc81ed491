/*!
 * Collaborators used by the script pipeline.
 *
 * The pipeline needs two external services: something that turns a prompt
 * into raw script text, and something that turns narration into audio.
 * Both sit behind traits so they can be swapped:
 * - `command`: delegates to user-configured external programs
 * - `mock`: scripted implementations for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use crate::errors::ProviderError;

/// Produces raw script text from a prompt
///
/// Implementations may return an empty string when the service answered
/// without usable text; the caller decides what that means.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Generate text for a prompt
    ///
    /// # Arguments
    /// * `prompt` - The fully rendered prompt
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The raw generated text or an error
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Turns narration text into an audio file
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize narration into `output_path`
    ///
    /// # Arguments
    /// * `text` - The narration to speak
    /// * `output_path` - Where the audio file must be written
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok once the file exists, or an error
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), ProviderError>;
}

pub mod command;
pub mod mock;
