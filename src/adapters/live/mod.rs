//! Live adapters for real external interactions.

pub mod breach;
pub mod clock;
pub mod directory;
pub mod filesystem;
pub mod shell;

use crate::error::PortError;

/// Map an HTTP failure status to the port error taxonomy.
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str, what: &str) -> PortError {
    let message = format!("{what} returned {}: {}", status.as_u16(), body.trim());
    match status.as_u16() {
        401 | 403 => PortError::Auth(message),
        404 => PortError::NotFound(message),
        429 => PortError::RateLimited(message),
        _ => PortError::Network(message),
    }
}
