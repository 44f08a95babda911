//! Directory port for group and user lookups.

use super::PortFuture;
use crate::model::{DirectoryMember, DirectoryUser, GroupRef};

/// Read access to a directory service (groups, memberships, users).
///
/// Every method returns a boxed future so the trait stays dyn-compatible.
/// Implementations copy their arguments before building the future.
pub trait Directory: Send + Sync {
    /// Verifies that a session with the directory can be established.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or rejects the credentials.
    fn connect(&self) -> PortFuture<'_, ()>;

    /// Resolves a group by id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotFound`](crate::error::PortError::NotFound) for unknown ids.
    fn resolve_group(&self, id: &str) -> PortFuture<'_, GroupRef>;

    /// Searches groups by display name. May return an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the search request fails.
    fn find_groups_by_display_name(&self, name: &str) -> PortFuture<'_, Vec<GroupRef>>;

    /// Lists every group in the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    fn list_all_groups(&self) -> PortFuture<'_, Vec<GroupRef>>;

    /// Lists the direct members of a group, in directory order.
    ///
    /// # Errors
    ///
    /// Returns an error if the group cannot be read.
    fn list_group_members(&self, group_id: &str) -> PortFuture<'_, Vec<DirectoryMember>>;

    /// Resolves a user by object id.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::NotFound`](crate::error::PortError::NotFound) for unknown ids.
    fn resolve_user(&self, id: &str) -> PortFuture<'_, DirectoryUser>;
}
