//! Recording session managing per-port cassette recorders.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Per-port recorders for one recording run.
///
/// Each port writes its own `<port>.cassette.yaml` in the session directory,
/// which [`CassetteConfig::from_dir`](super::config::CassetteConfig::from_dir)
/// reads back.
pub struct RecordingSession {
    /// Recorder for directory interactions.
    pub directory: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for breach lookup interactions.
    pub breaches: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for clock readings.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for report writes.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for program runs.
    pub shell: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing into a timestamped directory below `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn in_dir(root: PathBuf) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            Arc::new(Mutex::new(CassetteRecorder::new(
                path,
                format!("{timestamp}-{port}"),
                env!("CARGO_PKG_VERSION"),
            )))
        };

        Ok(Self {
            directory: make_recorder("directory"),
            breaches: make_recorder("breaches"),
            clock: make_recorder("clock"),
            fs: make_recorder("fs"),
            shell: make_recorder("shell"),
            output_dir,
        })
    }

    /// Write every port's cassette and return the session directory.
    ///
    /// The recording adapters must have been dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds a recorder or a file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.directory, "directory")?;
        finish_one(self.breaches, "breaches")?;
        finish_one(self.clock, "clock")?;
        finish_one(self.fs, "fs")?;
        finish_one(self.shell, "shell")?;
        Ok(self.output_dir)
    }
}
