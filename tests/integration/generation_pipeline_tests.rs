/*!
 * Integration tests for the topic to script to audio pipeline
 */

use anyhow::Result;
use shortscript::api::{ErrorResponse, GenerateRequest};
use shortscript::providers::mock::{MockBehavior, MockGenerator, MockSynthesizer};
use shortscript::{AppError, ProviderError, ScriptError, ScriptParser};
use crate::common;

/// Test a full run writes the narration audio into the configured directory
#[tokio::test]
async fn test_run_withWorkingCollaborators_shouldWriteAudio() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::working(common::SAMPLE_SCRIPT);
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let outcome = controller.run("honey bees").await?;

    assert_eq!(outcome.script.title, "The Secret Life of Bees");
    assert_eq!(outcome.script.sections.len(), 4);
    assert!(outcome.audio_path.exists());
    assert_eq!(outcome.audio_path.parent(), Some(temp_dir.path()));

    let file_name = outcome.audio_file_name();
    assert!(file_name.starts_with("The_Secret_Life_of_Bees_"));
    assert!(file_name.ends_with(".mp3"));

    let calls = synthesizer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, outcome.script.narration());
    assert_eq!(calls[0].1, outcome.audio_path);
    assert!(!calls[0].0.contains("Visual"));
    Ok(())
}

/// Test the prompt sent to the generator carries the topic
#[tokio::test]
async fn test_run_withTopic_shouldSendRenderedPrompt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::working(common::SAMPLE_SCRIPT);
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    controller.run("  honey bees  ").await?;

    let prompt = generator.last_prompt().unwrap_or_default();
    assert!(prompt.contains("honey bees"));
    assert!(!prompt.contains("{topic}"));
    assert_eq!(generator.request_count(), 1);
    Ok(())
}

/// Test an empty generator response stops before synthesis
#[tokio::test]
async fn test_run_withEmptyGenerator_shouldFailWithoutSynthesis() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::empty();
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let result = controller.run("bees").await;

    assert!(matches!(result, Err(AppError::Script(ScriptError::EmptyUpstreamResponse))));
    assert!(synthesizer.calls().is_empty());
    Ok(())
}

/// Test generator failures surface as provider errors
#[tokio::test]
async fn test_run_withFailingGenerator_shouldReturnProviderError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::failing();
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let result = controller.run("bees").await;

    assert!(matches!(result, Err(AppError::Provider(ProviderError::RequestFailed(_)))));
    assert_eq!(generator.request_count(), 1);
    Ok(())
}

/// Test synthesizer failures surface as provider errors
#[tokio::test]
async fn test_run_withFailingSynthesizer_shouldReturnProviderError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::working(common::SAMPLE_SCRIPT);
    let synthesizer = MockSynthesizer::failing();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let result = controller.run("bees").await;

    assert!(matches!(result, Err(AppError::Provider(_))));
    Ok(())
}

/// Test a blank topic is rejected before the generator is called
#[tokio::test]
async fn test_run_withBlankTopic_shouldReturnMissingTopic() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::working(common::SAMPLE_SCRIPT);
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let result = controller.run(" \t ").await;

    let error = result.err().map(|e| e.status_code());
    assert_eq!(error, Some(400));
    assert_eq!(generator.request_count(), 0);
    Ok(())
}

/// Test unstructured generator output still produces audio
#[tokio::test]
async fn test_run_withUnstructuredOutput_shouldUseFallbackSection() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let raw = "Bees are fascinating creatures that dance to talk.";
    let generator = MockGenerator::working(raw);
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let outcome = controller.run("bees").await?;

    assert_eq!(outcome.script.title, raw);
    assert_eq!(outcome.script.sections.len(), 1);
    assert_eq!(synthesizer.calls()[0].0, raw);
    Ok(())
}

/// Test the boundary handler builds the success body
#[tokio::test]
async fn test_handle_withTopic_shouldReturnSuccessResponse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::working(common::SAMPLE_SCRIPT);
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let response = controller.handle(&GenerateRequest::new("bees")).await?;
    assert!(response.success);
    assert_eq!(response.script, ScriptParser::new().parse(common::SAMPLE_SCRIPT));

    let json = serde_json::to_value(&response)?;
    assert_eq!(json["success"], true);
    assert_eq!(json["audioFile"], response.audio_file);

    let located = controller.locate_audio(&response.audio_file)?;
    assert!(located.exists());
    Ok(())
}

/// Test a request without a topic maps to a 400 body
#[tokio::test]
async fn test_handle_withMissingTopic_shouldMapToBadRequest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::working(common::SAMPLE_SCRIPT);
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let request: GenerateRequest = serde_json::from_str("{}")?;
    let error = match controller.handle(&request).await {
        Ok(_) => panic!("request without topic should fail"),
        Err(e) => e,
    };

    let (status, body) = ErrorResponse::from_error(&error);
    assert_eq!(status, 400);
    assert_eq!(body.error, "Topic is required");
    Ok(())
}

/// Test unknown audio names are reported as not found
#[test]
fn test_locateAudio_withUnknownName_shouldReturnNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::working(common::SAMPLE_SCRIPT);
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let error = controller.locate_audio("nothing_here.mp3").err();
    assert!(matches!(error, Some(AppError::NotFound(_))));

    let error = controller.locate_audio("../secret.mp3").err();
    assert_eq!(error.map(|e| e.status_code()), Some(404));
    Ok(())
}

/// Test two runs in the same second never overwrite each other
#[tokio::test]
async fn test_run_twiceWithSameTitle_shouldUseDistinctFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let generator = MockGenerator::new(MockBehavior::Working(common::SAMPLE_SCRIPT.to_string()));
    let synthesizer = MockSynthesizer::working();
    let controller = common::mock_controller(temp_dir.path(), &generator, &synthesizer);

    let first = controller.run("bees").await?;
    let second = controller.run("bees").await?;

    assert_ne!(first.audio_path, second.audio_path);
    assert!(first.audio_path.exists());
    assert!(second.audio_path.exists());
    Ok(())
}
