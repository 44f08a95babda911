//! Recording adapters that capture port interactions to cassettes.

pub mod breach;
pub mod clock;
pub mod directory;
pub mod filesystem;
pub mod shell;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;
use crate::error::PortResult;

pub use breach::RecordingBreachLookup;
pub use clock::RecordingClock;
pub use directory::RecordingDirectory;
pub use filesystem::RecordingFileSystem;
pub use shell::RecordingShellExecutor;

/// Boxed error returned by the synchronous local ports.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Record an interaction with a plain (non-`Result`) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a local port result; errors are kept as their message, which is
/// how the replaying fs and shell adapters read them back.
pub(crate) fn record_local_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, BoxError>,
) where
    T: Serialize,
    I: Serialize,
{
    let output = match result {
        Ok(v) => serde_json::json!({ "ok": v }),
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    record_interaction(recorder, port, method, input, &output);
}

/// Record a port result using the `{"ok": v}` / `{"err": e}` convention.
///
/// Mirror of `replaying::replay_result`.
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &PortResult<T>,
) where
    T: Serialize,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = match result {
        Ok(v) => {
            let inner = serde_json::to_value(v).expect("failed to serialize Ok value");
            serde_json::json!({ "ok": inner })
        }
        Err(e) => {
            let inner = serde_json::to_value(e).expect("failed to serialize port error");
            serde_json::json!({ "err": inner })
        }
    };

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}
