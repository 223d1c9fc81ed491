/*!
 * # shortscript - short video scripts with narration
 *
 * A Rust library that turns a topic into a structured video script and a
 * narration audio file.
 *
 * ## Features
 *
 * - Render a generation prompt for a topic
 * - Parse loosely formatted generator output into a title and ordered
 *   sections, each with narration and visual-scene cues
 * - Fall back to a single section when the output has no recognizable structure
 * - Synthesize the narration through a pluggable speech collaborator
 * - JSON configuration and boundary types for a generate endpoint
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `script`: Script document model and parser:
 *   - `script::model`: `ScriptDocument` and `Section`
 *   - `script::parser`: the line-oriented state machine
 * - `app_config`: Configuration management
 * - `app_controller`: Generation pipeline orchestration
 * - `providers`: Collaborator traits and implementations:
 *   - `providers::command`: external program backed generator and synthesizer
 *   - `providers::mock`: scripted collaborators for tests
 * - `prompts`: Prompt template
 * - `api`: Request and response shapes of the generate boundary
 * - `file_utils`: File system operations and audio naming
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![cfg_attr(test, allow(non_snake_case))]

// Public modules
pub mod api;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod prompts;
pub mod providers;
pub mod script;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, GenerationOutcome};
pub use script::{ScriptDocument, ScriptParser, Section};
pub use errors::{AppError, ProviderError, ScriptError};
