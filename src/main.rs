// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};

use shortscript::api::ErrorResponse;
use shortscript::app_config::{self, Config};
use shortscript::file_utils::FileManager;
use shortscript::{AppError, Controller, ScriptDocument, ScriptParser};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a script and its narration audio for a topic
    Generate(GenerateArgs),

    /// Parse raw generated text into a script document (JSON on stdout)
    Parse(ParseArgs),

    /// Print the prompt that would be sent for a topic
    Prompt {
        /// Topic of the video
        #[arg(value_name = "TOPIC")]
        topic: String,
    },

    /// Generate shell completions for shortscript
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Topic of the video; asked for interactively when omitted
    #[arg(value_name = "TOPIC")]
    topic: Option<String>,

    /// Model name passed to the generator command
    #[arg(short, long)]
    model: Option<String>,

    /// Directory receiving the audio file
    #[arg(short, long)]
    audio_dir: Option<PathBuf>,

    /// Print the JSON response body instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ParseArgs {
    /// File with raw generated text, or '-' for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,
}

/// shortscript - short video scripts with narration
#[derive(Parser, Debug)]
#[command(name = "shortscript")]
#[command(author = "shortscript Team")]
#[command(version = "1.0.0")]
#[command(about = "Turn a topic into a short video script and narration audio")]
#[command(long_about = "shortscript asks a text generator for a short video script, parses it into
sections with visual cues, and synthesizes the narration to an audio file.

EXAMPLES:
    shortscript generate \"black holes\"          # Script + audio using conf.json
    shortscript generate                         # Ask for the topic interactively
    shortscript generate --json \"tea\" > out.json # Print the JSON response body
    shortscript prompt \"tea\" | llm | shortscript parse
    shortscript completions bash > shortscript.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically by the generate command.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
// Filters on the global max level so it can be changed after init.
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // The level is adjusted after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level((&level).into());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "shortscript", &mut std::io::stdout());
            Ok(())
        }
        Commands::Prompt { ref topic } => {
            let config = load_config_if_present(&cli.config_path)?;
            let prompt = config.generation.prompt();
            if topic.trim().is_empty() {
                return Err(anyhow!("Topic cannot be empty"));
            }
            println!("{}", prompt.render(topic));
            Ok(())
        }
        Commands::Parse(ref args) => run_parse(args),
        Commands::Generate(args) => run_generate(args, &cli.config_path, cli.log_level.is_some()).await,
    }
}

// Existing config or defaults, without writing anything
fn load_config_if_present(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        Config::load(config_path)
    } else {
        Ok(Config::default())
    }
}

fn run_parse(args: &ParseArgs) -> Result<()> {
    let raw_text = if args.input == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        FileManager::read_to_string(&args.input)?
    };

    let script = ScriptParser::new()
        .parse_checked(&raw_text)
        .map_err(AppError::from)?;

    println!("{}", serde_json::to_string_pretty(&script)?);
    Ok(())
}

async fn run_generate(args: GenerateArgs, config_path: &str, log_level_from_cli: bool) -> Result<()> {
    let mut config = Config::load_or_create(config_path)?;

    if let Some(model) = &args.model {
        config.generation.model = model.clone();
    }

    if let Some(audio_dir) = &args.audio_dir {
        config.speech.audio_dir = audio_dir.to_string_lossy().to_string();
    }

    // If log level was not set via command line, take it from config now
    if !log_level_from_cli {
        log::set_max_level((&config.log_level).into());
    }

    let controller = Controller::with_config(config)
        .context("Configuration validation failed")?;

    let topic = match args.topic {
        Some(topic) if !topic.trim().is_empty() => topic,
        _ => prompt_for_topic()?,
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Generating script for '{}'", topic.trim()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = controller.run(&topic).await;
    spinner.finish_and_clear();

    match result {
        Ok(outcome) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&outcome.into_response())?);
            } else {
                print_script(&outcome.script);
                info!("Success: {:?}", outcome.audio_path);
            }
            Ok(())
        }
        Err(e) => {
            if args.json {
                let (_, body) = ErrorResponse::from_error(&e);
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
            Err(anyhow!("Error generating script: {}", e))
        }
    }
}

// Ask on stdin until a non-empty topic is given
fn prompt_for_topic() -> Result<String> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    print!("\nEnter the topic for your video: ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read topic")?;
        if !line.trim().is_empty() {
            return Ok(line.trim().to_string());
        }
        print!("Topic cannot be empty. Please enter a topic: ");
        stdout.flush()?;
    }

    warn!("No topic given before end of input");
    Err(AppError::from(shortscript::ScriptError::MissingTopic).into())
}

fn print_script(script: &ScriptDocument) {
    println!("\n{}\n", script.title);
    for (index, section) in script.sections.iter().enumerate() {
        println!("[{}] {}", index + 1, section.text);
        for scene in &section.scenes {
            println!("    - {}", scene);
        }
        println!();
    }
}
