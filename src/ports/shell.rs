//! Shell executor port for running external programs.

use serde::{Deserialize, Serialize};

/// The output of an external program run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

/// Executes external programs (the headless browser used for PDF export).
pub trait ShellExecutor: Send + Sync {
    /// Runs `program` with `args` and returns its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;
}
