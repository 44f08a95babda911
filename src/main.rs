//! Binary entrypoint for the `breachscan` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    breachscan::logging::init();
    // Recording is handled in commands::dispatch via BREACHSCAN_RECORD=<dir>.
    match breachscan::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
