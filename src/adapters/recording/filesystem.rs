//! Recording adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_local_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Records report writes while delegating to an inner filesystem.
///
/// Only the path is recorded; report bodies stay out of the cassette.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl FileSystem for RecordingFileSystem {
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.write(path, contents);
        let input = json!({ "path": path.display().to_string() });
        record_local_result(&self.recorder, "fs", "write", &input, &result);
        result
    }
}
