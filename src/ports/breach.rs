//! Breach lookup port.

use super::PortFuture;
use crate::model::BreachRecord;

/// Queries a breach-intelligence service for a single account.
pub trait BreachLookup: Send + Sync {
    /// Returns the breaches the account appears in (possibly none).
    ///
    /// # Errors
    ///
    /// Returns `RateLimited`, `Auth`, `Network` or `Malformed` failures.
    fn check_breaches(&self, email: &str, api_key: &str) -> PortFuture<'_, Vec<BreachRecord>>;
}
