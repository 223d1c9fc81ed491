/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use shortscript::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.generation.model, "gemini-1.5-flash");
    assert_eq!(config.generation.temperature, 0.7);
    assert_eq!(config.generation.top_p, 0.8);
    assert_eq!(config.generation.top_k, 40);
    assert_eq!(config.generation.max_output_tokens, 2048);
    assert_eq!(config.generation.api_key_env, "GOOGLE_API_KEY");
    assert_eq!(config.speech.language, "en");
    assert_eq!(config.speech.tld, "co.uk");
    assert_eq!(config.speech.audio_dir, "audio");
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.generation.temperature = 3.0;
    assert!(config.validate().is_err());
    config.generation.temperature = 0.0;
    assert!(config.validate().is_ok());

    config.generation.top_p = 0.0;
    assert!(config.validate().is_err());
    config.generation.top_p = 1.0;
    assert!(config.validate().is_ok());

    config.generation.max_output_tokens = 0;
    assert!(config.validate().is_err());
    config.generation.max_output_tokens = 512;

    config.generation.prompt_template = "Write a script".to_string();
    assert!(config.validate().is_err());
    config.generation.prompt_template = "Write a script about {topic}".to_string();
    assert!(config.validate().is_ok());

    config.speech.language = "xx".to_string();
    assert!(config.validate().is_err());
    config.speech.language = "en-GB".to_string();
    assert!(config.validate().is_ok());

    config.speech.command.args.retain(|arg| arg != "{output}");
    assert!(config.validate().is_err());
}

/// Test that missing fields fall back to defaults
#[test]
fn test_config_deserialize_withPartialJson_shouldFillDefaults() -> Result<()> {
    let config: Config = serde_json::from_str(
        r#"{"generation": {"model": "gemini-2.0-flash", "command": {"program": "my-llm"}}, "log_level": "debug"}"#,
    )?;

    assert_eq!(config.generation.model, "gemini-2.0-flash");
    assert_eq!(config.generation.command.program, "my-llm");
    assert!(config.generation.command.args.is_empty());
    assert_eq!(config.generation.command.timeout_secs, 120);
    assert_eq!(config.generation.top_k, 40);
    assert_eq!(config.speech.command.program, "gtts-cli");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test creating and reloading a config file
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let mut edited = created.clone();
    edited.speech.tld = "com.au".to_string();
    edited.save(&path)?;

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.speech.tld, "com.au");
    assert_eq!(reloaded.generation.model, created.generation.model);
    Ok(())
}

/// Test that a broken file is reported
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

/// Test API key resolution prefers the configured key
#[test]
fn test_resolvedApiKey_withConfiguredKey_shouldPreferIt() {
    let mut config = Config::default();
    config.generation.api_key = "from-config".to_string();
    assert_eq!(config.generation.resolved_api_key().as_deref(), Some("from-config"));

    config.generation.api_key = String::new();
    config.generation.api_key_env = String::new();
    assert_eq!(config.generation.resolved_api_key(), None);
}
