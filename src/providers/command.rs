/*!
 * Collaborators backed by external programs.
 *
 * Each call spawns the configured program, writes its input to stdin and
 * waits for it under a timeout. Arguments may carry `{name}` placeholders
 * that are filled in from the configuration before spawning.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, info};
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::app_config::{CommandConfig, GenerationConfig, SpeechConfig};
use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::{SpeechSynthesizer, TextGenerator};

/// Replace every `{key}` in each argument with its value
pub fn expand_args(args: &[String], vars: &[(&str, String)]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            vars.iter().fold(arg.clone(), |acc, (key, value)| {
                acc.replace(&format!("{{{}}}", key), value)
            })
        })
        .collect()
}

/// Run a program with `input` on stdin and collect its output
async fn run_command(
    program: &str,
    args: &[String],
    envs: &[(String, String)],
    input: &str,
    timeout_secs: u64,
) -> Result<Output, ProviderError> {
    debug!("Running {} {:?}", program, args);

    let mut child = Command::new(program)
        .args(args)
        .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ProviderError::RequestFailed(format!("Failed to start '{}': {}", program, e)))?;

    // Stdin is fed from its own task while output is collected.
    if let Some(mut stdin) = child.stdin.take() {
        let input = input.to_string();
        tokio::spawn(async move {
            if let Err(e) = stdin.write_all(input.as_bytes()).await {
                debug!("Child closed stdin early: {}", e);
            }
        });
    }

    let timeout_duration = Duration::from_secs(timeout_secs);
    let output = tokio::select! {
        result = child.wait_with_output() => result?,
        _ = tokio::time::sleep(timeout_duration) => {
            return Err(ProviderError::Timeout {
                program: program.to_string(),
                secs: timeout_secs,
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!("'{}' failed ({}): {}", program, output.status, stderr);
        return Err(ProviderError::CommandFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr,
        });
    }

    Ok(output)
}

/// Text generator that pipes the prompt through an external program
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    /// Program to run
    program: String,
    /// Arguments with placeholders expanded
    args: Vec<String>,
    /// Extra environment for the child
    envs: Vec<(String, String)>,
    /// Timeout per call
    timeout_secs: u64,
}

impl CommandGenerator {
    /// Create a generator from a raw command with no placeholder expansion
    pub fn new(command: &CommandConfig) -> Self {
        Self {
            program: command.program.clone(),
            args: command.args.clone(),
            envs: Vec::new(),
            timeout_secs: command.timeout_secs,
        }
    }

    /// Create a generator from generation settings
    ///
    /// Model parameters fill the argument placeholders and the API key, if
    /// any, is exported under `api_key_env`.
    pub fn from_config(config: &GenerationConfig) -> Self {
        let vars = [
            ("model", config.model.clone()),
            ("temperature", config.temperature.to_string()),
            ("top_p", config.top_p.to_string()),
            ("top_k", config.top_k.to_string()),
            ("max_output_tokens", config.max_output_tokens.to_string()),
        ];

        let mut generator = Self::new(&config.command);
        generator.args = expand_args(&config.command.args, &vars);

        if let Some(api_key) = config.resolved_api_key() {
            if !config.api_key_env.is_empty() {
                generator.envs.push((config.api_key_env.clone(), api_key));
            }
        }

        generator
    }

    /// Arguments passed to the program
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl TextGenerator for CommandGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let output = run_command(
            &self.program,
            &self.args,
            &self.envs,
            prompt,
            self.timeout_secs,
        )
        .await?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Speech synthesizer that pipes narration through an external program
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    /// Arguments with `{language}` and `{tld}` expanded; `{output}` is filled per call
    args: Vec<String>,
    timeout_secs: u64,
}

impl CommandSynthesizer {
    /// Create a synthesizer from speech settings
    ///
    /// Fails when the speech language is not a known ISO 639 code.
    pub fn from_config(config: &SpeechConfig) -> Result<Self> {
        let language = language_utils::normalize_speech_language(&config.language)
            .context("Invalid speech language")?;
        let language_name = language_utils::get_language_name(&language)?;
        info!("Narration language: {} ({})", language_name, language);

        let vars = [("language", language), ("tld", config.tld.clone())];

        Ok(Self {
            program: config.command.program.clone(),
            args: expand_args(&config.command.args, &vars),
            timeout_secs: config.command.timeout_secs,
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    async fn synthesize(&self, text: &str, output_path: &Path) -> Result<(), ProviderError> {
        let args = expand_args(&self.args, &[("output", output_path.display().to_string())]);

        run_command(&self.program, &args, &[], text, self.timeout_secs).await?;

        // The controller reserves the path as an empty file before calling.
        let written = tokio::fs::metadata(output_path)
            .await
            .map(|meta| meta.is_file() && meta.len() > 0)
            .unwrap_or(false);

        if !written {
            return Err(ProviderError::RequestFailed(format!(
                "'{}' finished without writing {}",
                self.program,
                output_path.display()
            )));
        }

        Ok(())
    }
}
