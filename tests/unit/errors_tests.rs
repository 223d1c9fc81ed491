/*!
 * Tests for error types and conversions
 */

use shortscript::api::ErrorResponse;
use shortscript::errors::{AppError, ProviderError, ScriptError};

#[test]
fn test_scriptError_emptyUpstreamResponse_shouldDisplayCorrectly() {
    let display = ScriptError::EmptyUpstreamResponse.to_string();
    assert!(display.contains("No response generated"));
}

#[test]
fn test_scriptError_emptyDocument_shouldDisplayCorrectly() {
    assert_eq!(ScriptError::EmptyDocument.to_string(), "Failed to parse script sections");
}

#[test]
fn test_providerError_commandFailed_shouldDisplayProgramAndStderr() {
    let error = ProviderError::CommandFailed {
        program: "llm".to_string(),
        status: "exit status: 2".to_string(),
        stderr: "bad key".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("llm"));
    assert!(display.contains("exit status: 2"));
    assert!(display.contains("bad key"));
}

#[test]
fn test_providerError_timeout_shouldDisplaySeconds() {
    let error = ProviderError::Timeout { program: "gtts-cli".to_string(), secs: 30 };
    assert!(error.to_string().contains("30 seconds"));
}

#[test]
fn test_appError_fromScriptError_shouldWrapCorrectly() {
    let app_error: AppError = ScriptError::EmptyDocument.into();
    assert!(matches!(app_error, AppError::Script(ScriptError::EmptyDocument)));
    assert_eq!(app_error.status_code(), 500);
}

#[test]
fn test_appError_fromIoError_shouldBeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let app_error: AppError = io_error.into();
    assert!(matches!(app_error, AppError::File(_)));
}

#[test]
fn test_appError_statusCodes_shouldMatchBoundaryContract() {
    assert_eq!(AppError::Script(ScriptError::MissingTopic).status_code(), 400);
    assert_eq!(AppError::NotFound("x.mp3".to_string()).status_code(), 404);
    assert_eq!(AppError::Script(ScriptError::EmptyUpstreamResponse).status_code(), 500);
}

#[test]
fn test_errorResponse_withEmptyUpstream_shouldCarryMessage() {
    let (status, body) = ErrorResponse::from_error(&AppError::Script(ScriptError::EmptyUpstreamResponse));
    assert_eq!(status, 500);
    assert_eq!(body.error, ScriptError::EmptyUpstreamResponse.to_string());
    assert_eq!(serde_json::to_value(&body).unwrap()["error"], body.error);
}
