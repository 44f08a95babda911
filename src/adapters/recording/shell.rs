//! Recording adapter for the `ShellExecutor` port.

use std::sync::{Arc, Mutex};

use serde_json::json;

use super::record_local_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ShellExecutor, ShellOutput};

/// Records program runs while delegating to an inner executor.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingShellExecutor {
    /// Creates a new recording shell executor wrapping the given implementation.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.run(program, args);
        let input = json!({ "program": program, "args": args });
        record_local_result(&self.recorder, "shell", "run", &input, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeShell;

    #[test]
    fn records_exit_codes_and_spawn_failures() {
        let dir = std::env::temp_dir().join("breachscan_rec_shell_test");
        let path = dir.join("shell.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test", "0.1.0")));

        {
            let exiting = RecordingShellExecutor::new(
                Box::new(FakeShell::exiting(1)),
                Arc::clone(&recorder),
            );
            let out = exiting.run("chromium", &["--headless".into()]).unwrap();
            assert_eq!(out.exit_code, 1);

            let missing =
                RecordingShellExecutor::new(Box::new(FakeShell::missing()), Arc::clone(&recorder));
            assert!(missing.run("chromium", &[]).is_err());
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("--headless"));
        assert!(content.contains("exit_code: 1"));
        assert!(content.contains("chromium: command not found"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
