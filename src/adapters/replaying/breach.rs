//! Replaying adapter for the `BreachLookup` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::model::BreachRecord;
use crate::ports::{BreachLookup, PortFuture};

/// Serves recorded breach lookups from a cassette.
pub struct ReplayingBreachLookup {
    replayer: SharedReplayer,
}

impl ReplayingBreachLookup {
    /// Create a replaying breach lookup backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl BreachLookup for ReplayingBreachLookup {
    fn check_breaches(&self, _email: &str, _api_key: &str) -> PortFuture<'_, Vec<BreachRecord>> {
        let output = next_output(&self.replayer, "breaches", "check_breaches");
        Box::pin(async move { replay_result(output) })
    }
}
