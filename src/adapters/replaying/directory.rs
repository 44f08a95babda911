//! Replaying adapter for the `Directory` port.

use super::{next_output, replay_result, SharedReplayer};
use crate::model::{DirectoryMember, DirectoryUser, GroupRef};
use crate::ports::{Directory, PortFuture};

/// Serves recorded directory responses from a cassette.
pub struct ReplayingDirectory {
    replayer: SharedReplayer,
}

impl ReplayingDirectory {
    /// Create a replaying directory backed by the given replayer.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }

    fn replay<T>(&self, method: &str) -> PortFuture<'_, T>
    where
        T: serde::de::DeserializeOwned + Send + 'static,
    {
        let output = next_output(&self.replayer, "directory", method);
        Box::pin(async move { replay_result(output) })
    }
}

impl Directory for ReplayingDirectory {
    fn connect(&self) -> PortFuture<'_, ()> {
        self.replay("connect")
    }

    fn resolve_group(&self, _id: &str) -> PortFuture<'_, GroupRef> {
        self.replay("resolve_group")
    }

    fn find_groups_by_display_name(&self, _name: &str) -> PortFuture<'_, Vec<GroupRef>> {
        self.replay("find_groups_by_display_name")
    }

    fn list_all_groups(&self) -> PortFuture<'_, Vec<GroupRef>> {
        self.replay("list_all_groups")
    }

    fn list_group_members(&self, _group_id: &str) -> PortFuture<'_, Vec<DirectoryMember>> {
        self.replay("list_group_members")
    }

    fn resolve_user(&self, _id: &str) -> PortFuture<'_, DirectoryUser> {
        self.replay("resolve_user")
    }
}
