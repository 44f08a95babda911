//! Filesystem port for report output.

use std::path::Path;

/// Writes report files.
pub trait FileSystem: Send + Sync {
    /// Writes `contents` to `path`, creating or overwriting the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
