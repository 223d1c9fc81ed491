/*!
 * Request and response shapes of the generate boundary.
 *
 * A client posts `{"topic": ...}` and receives either
 * `{"success": true, "script": ..., "audioFile": ...}` or `{"error": ...}`
 * together with a failure status.
 */

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::script::ScriptDocument;

/// Body of a generate request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Topic of the video; missing and blank are both rejected
    #[serde(default)]
    pub topic: Option<String>,
}

impl GenerateRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.into()),
        }
    }

    /// The topic if present and not blank
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }
}

/// Successful generate response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub script: ScriptDocument,
    /// Bare file name of the audio, to be fetched from the audio endpoint
    pub audio_file: String,
}

impl GenerateResponse {
    pub fn new(script: ScriptDocument, audio_file: impl Into<String>) -> Self {
        Self {
            success: true,
            script,
            audio_file: audio_file.into(),
        }
    }
}

/// Failed request response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// Build the response body and status code for an error
    pub fn from_error(error: &AppError) -> (u16, Self) {
        let message = match error {
            AppError::Script(script_error) => script_error.to_string(),
            AppError::Provider(provider_error) => provider_error.to_string(),
            other => other.to_string(),
        };

        (error.status_code(), Self { error: message })
    }
}
