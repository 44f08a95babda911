//! Live shell executor using `std::process::Command`.

use std::process::Command;

use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Runs programs directly, without an intermediate shell.
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| format!("failed to start {program}: {e}"))?;
        Ok(ShellOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_program_with_arguments() {
        let result = LiveShellExecutor.run("echo", &["hello".to_string()]).unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn missing_program_is_an_error() {
        let err = LiveShellExecutor.run("breachscan-no-such-program", &[]).unwrap_err();
        assert!(err.to_string().contains("failed to start breachscan-no-such-program"));
    }
}
