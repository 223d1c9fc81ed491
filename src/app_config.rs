use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::prompts::PromptTemplate;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings. The configuration is built
/// once at startup and handed to the controller explicitly.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Script generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Speech synthesis settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// External program used as a collaborator
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommandConfig {
    // @field: Executable name or path
    pub program: String,

    // @field: Arguments, may contain placeholders
    #[serde(default)]
    pub args: Vec<String>,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CommandConfig {
    // @param program: Executable
    // @param args: Argument templates
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Script generation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Model name passed to the generator command
    #[serde(default = "default_model")]
    pub model: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling mass (0.0 exclusive to 1.0)
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Number of candidate tokens considered per step
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Upper bound on generated tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// API key exported to the generator command
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Environment variable the API key is read from and exported as
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Prompt template
    /// Placeholders: {topic}
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Command producing raw script text from a prompt on stdin
    #[serde(default = "default_generator_command")]
    pub command: CommandConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
            api_key: String::new(),
            api_key_env: default_api_key_env(),
            prompt_template: default_prompt_template(),
            command: default_generator_command(),
        }
    }
}

impl GenerationConfig {
    /// Get the API key, falling back to the configured environment variable
    pub fn resolved_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }

        if self.api_key_env.is_empty() {
            return None;
        }

        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the prompt template
    pub fn prompt(&self) -> PromptTemplate {
        PromptTemplate::new(&self.prompt_template)
    }
}

/// Speech synthesis settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpeechConfig {
    /// Narration language code
    #[serde(default = "default_speech_language")]
    pub language: String,

    /// Accent selector passed to the speech command (e.g. "co.uk")
    #[serde(default = "default_tld")]
    pub tld: String,

    /// Directory receiving generated audio files
    #[serde(default = "default_audio_dir")]
    pub audio_dir: String,

    /// Command writing audio for narration read from stdin
    #[serde(default = "default_speech_command")]
    pub command: CommandConfig,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            language: default_speech_language(),
            tld: default_tld(),
            audio_dir: default_audio_dir(),
            command: default_speech_command(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.8
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    2048
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_prompt_template() -> String {
    PromptTemplate::SHORT_VIDEO.to_string()
}

fn default_generator_command() -> CommandConfig {
    CommandConfig::new(
        "llm",
        &[
            "-m", "{model}",
            "-o", "temperature", "{temperature}",
            "-o", "top_p", "{top_p}",
            "-o", "top_k", "{top_k}",
            "-o", "max_output_tokens", "{max_output_tokens}",
        ],
    )
}

fn default_speech_language() -> String {
    "en".to_string()
}

fn default_tld() -> String {
    "co.uk".to_string()
}

fn default_audio_dir() -> String {
    "audio".to_string()
}

fn default_speech_command() -> CommandConfig {
    CommandConfig::new(
        "gtts-cli",
        &["-", "--lang", "{language}", "--tld", "{tld}", "--output", "{output}"],
    )
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load the configuration, writing a default one first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let generation = &self.generation;

        if generation.command.program.trim().is_empty() {
            return Err(anyhow!("Generation command program must not be empty"));
        }

        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(anyhow!(
                "Temperature must be between 0.0 and 2.0, got {}",
                generation.temperature
            ));
        }

        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            return Err(anyhow!("top_p must be in (0.0, 1.0], got {}", generation.top_p));
        }

        if generation.command.timeout_secs == 0 || self.speech.command.timeout_secs == 0 {
            return Err(anyhow!("Command timeouts must be greater than zero"));
        }

        if generation.max_output_tokens == 0 {
            return Err(anyhow!("max_output_tokens must be greater than zero"));
        }

        if !generation.prompt().has_topic_placeholder() {
            return Err(anyhow!(
                "Prompt template must contain the {} placeholder",
                PromptTemplate::TOPIC_PLACEHOLDER
            ));
        }

        let speech = &self.speech;

        if speech.command.program.trim().is_empty() {
            return Err(anyhow!("Speech command program must not be empty"));
        }

        if !speech.command.args.iter().any(|arg| arg.contains("{output}")) {
            return Err(anyhow!("Speech command arguments must contain the {{output}} placeholder"));
        }

        crate::language_utils::normalize_speech_language(&speech.language)
            .context("Invalid speech language")?;

        if speech.audio_dir.trim().is_empty() {
            return Err(anyhow!("Audio directory must not be empty"));
        }

        Ok(())
    }
}
