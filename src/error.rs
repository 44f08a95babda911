//! Error types for collaborator calls and for whole scans.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by a port (directory or breach lookup).
///
/// Serializable so that cassettes can record and replay failures.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum PortError {
    /// The requested group or user does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// The service throttled the request.
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// Credentials were missing, invalid or insufficient.
    #[error("authentication failed: {0}")]
    Auth(String),
    /// Transport failure or unexpected HTTP status.
    #[error("network error: {0}")]
    Network(String),
    /// The response could not be decoded.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Result type for port operations.
pub type PortResult<T> = Result<T, PortError>;

/// Failures that abort a whole scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The directory session could not be established.
    #[error("failed to connect to the directory service: {0}")]
    Connect(#[source] PortError),
    /// None of the seed groups could be resolved.
    #[error("no valid groups found")]
    NoValidGroups,
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),
    /// Writing or exporting the report failed.
    #[error("report error: {0}")]
    Report(String),
}

/// Result type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
