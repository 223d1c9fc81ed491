/*!
 * Script document model and parsing.
 *
 * - `model`: `ScriptDocument` and `Section` value types
 * - `parser`: line-oriented parser from generated text to a document
 */

pub mod model;
pub mod parser;

pub use model::{ScriptDocument, Section};
pub use parser::{LineKind, ScriptParser};
