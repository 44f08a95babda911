//! Cassettes: recorded port interactions replayed in tests and audits.
//!
//! A cassette is a YAML list of `{seq, port, method, input, output}`
//! entries. Fallible outputs use `{"ok": value}` or `{"err": PortError}`.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
