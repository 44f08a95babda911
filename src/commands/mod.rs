//! Command dispatch and handlers.

pub mod groups;
pub mod scan;

use std::env;
use std::future::Future;
use std::path::PathBuf;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::{self, ScanConfig};
use crate::context::ServiceContext;

/// A command with its validated inputs.
enum Job<'a> {
    Scan(ScanConfig),
    Groups(Option<&'a str>),
}

/// Dispatch a parsed command to its handler.
///
/// Configuration is validated before any connection is made. When
/// `BREACHSCAN_RECORD` is set to a directory path, every port interaction
/// is recorded to per-port cassette files below that directory.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let vars = config::process_env();
    let job = match command {
        Command::Scan(args) => Job::Scan(ScanConfig::from_args(args, &vars).map_err(|e| e.to_string())?),
        Command::Groups { filter } => Job::Groups(filter.as_deref()),
    };
    let token = config::graph_token(&vars).map_err(|e| e.to_string())?;

    let (ctx, session) = if let Ok(path) = env::var("BREACHSCAN_RECORD") {
        let (ctx, session) = ServiceContext::recording_at(PathBuf::from(path), &token)?;
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&token), None)
    };

    let result = match &job {
        Job::Scan(scan_config) => block_on(scan::execute(&ctx, scan_config)),
        Job::Groups(filter) => block_on(groups::run(&ctx, *filter)),
    };

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Drives a command future on a single-threaded runtime.
fn block_on(future: impl Future<Output = Result<(), String>>) -> Result<(), String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start async runtime: {e}"))?
        .block_on(future)
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
