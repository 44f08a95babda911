//! Replaying adapter for the `ShellExecutor` port.

use super::{next_output, SharedReplayer};
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Replays recorded program runs from a cassette.
pub struct ReplayingShellExecutor {
    replayer: SharedReplayer,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(
        &self,
        _program: &str,
        _args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "shell", "run");
        if let Some(err) = output.get("err") {
            return Err(err.as_str().unwrap_or("unknown error").to_string().into());
        }
        let value = output.get("ok").cloned().unwrap_or(output);
        serde_json::from_value(value).map_err(|e| format!("shell::run: failed to deserialize: {e}").into())
    }
}
