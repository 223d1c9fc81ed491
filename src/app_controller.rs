use anyhow::Result;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{GenerateRequest, GenerateResponse};
use crate::app_config::Config;
use crate::errors::{AppError, ScriptError};
use crate::file_utils::FileManager;
use crate::providers::command::{CommandGenerator, CommandSynthesizer};
use crate::providers::{SpeechSynthesizer, TextGenerator};
use crate::script::{ScriptDocument, ScriptParser};

// @module: Application controller for script generation

/// Result of a full generation run
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The parsed script
    pub script: ScriptDocument,
    /// Where the narration audio was written
    pub audio_path: PathBuf,
}

impl GenerationOutcome {
    /// Bare file name of the audio file
    pub fn audio_file_name(&self) -> String {
        self.audio_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn into_response(self) -> GenerateResponse {
        let audio_file = self.audio_file_name();
        GenerateResponse::new(self.script, audio_file)
    }
}

/// Main application controller: topic in, script and narration audio out
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Script parser
    parser: ScriptParser,
    // @field: Raw script source
    generator: Arc<dyn TextGenerator>,
    // @field: Narration audio sink
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl Controller {
    // @method: Create a controller backed by the configured external commands
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;

        let generator = Arc::new(CommandGenerator::from_config(&config.generation));
        let synthesizer = Arc::new(CommandSynthesizer::from_config(&config.speech)?);

        Ok(Self::with_collaborators(config, generator, synthesizer))
    }

    // @method: Create a controller with explicit collaborators
    pub fn with_collaborators(
        config: Config,
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            config,
            parser: ScriptParser::new(),
            generator,
            synthesizer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory receiving generated audio
    pub fn audio_dir(&self) -> &Path {
        Path::new(&self.config.speech.audio_dir)
    }

    /// Render the generation prompt for a topic
    pub fn render_prompt(&self, topic: &str) -> Result<String, AppError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ScriptError::MissingTopic.into());
        }

        Ok(self.config.generation.prompt().render(topic))
    }

    /// Generate and parse a script for a topic
    pub async fn generate_script(&self, topic: &str) -> Result<ScriptDocument, AppError> {
        let prompt = self.render_prompt(topic)?;

        info!("Generating script for topic: {}", topic.trim());
        let raw_text = self.generator.generate(&prompt).await?;
        debug!("Raw generator response:\n{}", raw_text);

        let script = self.parser.parse_checked(&raw_text)?;

        info!(
            "Parsed '{}': {} section(s), {} scene(s)",
            script.title,
            script.sections.len(),
            script.scene_count()
        );

        Ok(script)
    }

    /// Synthesize the narration of a script into the audio directory
    pub async fn generate_audio(&self, script: &ScriptDocument) -> Result<PathBuf, AppError> {
        let audio_dir = self.audio_dir();
        FileManager::ensure_dir(audio_dir).map_err(|e| AppError::File(e.to_string()))?;

        let output_path = Self::reserve_audio_path(audio_dir, &script.title).await?;
        let narration = script.narration();

        debug!("Synthesizing {} characters of narration", narration.len());
        if let Err(e) = self.synthesizer.synthesize(&narration, &output_path).await {
            if let Err(remove_error) = tokio::fs::remove_file(&output_path).await {
                warn!("Failed to remove reserved audio file {:?}: {}", output_path, remove_error);
            }
            return Err(e.into());
        }

        info!("Audio file saved to: {:?}", output_path);
        Ok(output_path)
    }

    /// Run the whole pipeline for a topic
    pub async fn run(&self, topic: &str) -> Result<GenerationOutcome, AppError> {
        let start_time = Instant::now();

        let script = self.generate_script(topic).await?;
        let audio_path = self.generate_audio(&script).await?;

        info!("Generation completed in {}.", Self::format_duration(start_time.elapsed()));

        Ok(GenerationOutcome { script, audio_path })
    }

    /// Handle a boundary request
    pub async fn handle(&self, request: &GenerateRequest) -> Result<GenerateResponse, AppError> {
        let topic = request.topic().ok_or(ScriptError::MissingTopic)?;
        Ok(self.run(topic).await?.into_response())
    }

    /// Find a previously generated audio file by its bare name
    pub fn locate_audio(&self, file_name: &str) -> Result<PathBuf, AppError> {
        FileManager::resolve_in_dir(self.audio_dir(), file_name)
            .ok_or_else(|| AppError::NotFound(format!("Audio file not found: {}", file_name)))
    }

    // Claims a free name by creating it empty; the suffix starts at the
    // current unix second and is bumped while the name is taken.
    async fn reserve_audio_path(audio_dir: &Path, title: &str) -> Result<PathBuf, AppError> {
        let mut suffix = chrono::Utc::now().timestamp();
        loop {
            let candidate = audio_dir.join(FileManager::audio_file_name(title, suffix));
            let created = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await;

            match created {
                Ok(_) => return Ok(candidate),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => suffix += 1,
                Err(e) => {
                    return Err(AppError::File(format!(
                        "Failed to create audio file {:?}: {}",
                        candidate, e
                    )));
                }
            }
        }
    }

    /// Format a duration in a human-readable way
    pub fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        let millis = duration.subsec_millis();

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, millis)
        }
    }
}
