use crate::shared::error::BomError;
use crate::shared::security::validate_settings_file;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading settings files
///
/// Reads the credentials file and the YAML configuration with the same
/// security checks: no symbolic links, regular files only, bounded size.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a settings file after validating it
    ///
    /// # Errors
    /// Returns [`BomError::FileReadError`] when validation or reading fails
    pub fn read_settings_file(&self, path: &Path, file_description: &str) -> Result<String> {
        validate_settings_file(path, file_description)
            .and_then(|_| Ok(fs::read_to_string(path)?))
            .map_err(|e| {
                BomError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into()
            })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}
