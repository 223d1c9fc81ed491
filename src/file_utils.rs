use anyhow::{Result, Context};
use std::fs;
use std::path::{Component, Path, PathBuf};

// @module: File and directory utilities

/// Extension of generated audio files
pub const AUDIO_EXTENSION: &str = "mp3";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @returns: Title reduced to filename-safe characters
    // Keeps alphanumerics, spaces, hyphens and underscores; spaces become underscores.
    pub fn safe_title(title: &str) -> String {
        title
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .trim()
            .replace(' ', "_")
    }

    // @generates: Audio filename for a script title
    // @params: title, unique suffix (unix seconds)
    pub fn audio_file_name(title: &str, unique_suffix: i64) -> String {
        format!("{}_{}.{}", Self::safe_title(title), unique_suffix, AUDIO_EXTENSION)
    }

    /// Resolve a bare file name inside `dir`
    ///
    /// Returns `None` for names that are not a single normal path component
    /// (separators, `..`, absolute paths) and for files that do not exist.
    pub fn resolve_in_dir<P: AsRef<Path>>(dir: P, file_name: &str) -> Option<PathBuf> {
        let mut components = Path::new(file_name).components();
        let is_plain_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if !is_plain_name {
            return None;
        }

        let candidate = dir.as_ref().join(file_name);
        Self::file_exists(&candidate).then_some(candidate)
    }
}
