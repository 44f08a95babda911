//! Replaying adapters that serve recorded interactions.

pub mod breach;
pub mod clock;
pub mod directory;
pub mod filesystem;
pub mod shell;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::{PortError, PortResult};

pub use breach::ReplayingBreachLookup;
pub use clock::ReplayingClock;
pub use directory::ReplayingDirectory;
pub use filesystem::ReplayingFileSystem;
pub use shell::ReplayingShellExecutor;

/// Replayer shared between the adapters of one context.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Take the output of the next `port::method` interaction.
pub(crate) fn next_output(replayer: &SharedReplayer, port: &str, method: &str) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Decode a `{"ok": value}` / `{"err": PortError}` output.
///
/// A malformed recording is reported as [`PortError::Malformed`] rather
/// than a panic so the calling code's error path is exercised.
pub(crate) fn replay_result<T: DeserializeOwned>(output: serde_json::Value) -> PortResult<T> {
    if let Some(err) = output.get("err") {
        return Err(serde_json::from_value(err.clone())
            .unwrap_or_else(|_| PortError::Network(err.to_string())));
    }
    let value = output.get("ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| PortError::Malformed(format!("cassette output: {e}")))
}
