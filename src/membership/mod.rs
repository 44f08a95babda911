//! Recursive group-membership resolution.
//!
//! Walks the membership graph depth-first from one or more seed groups and
//! flattens it into an ordered list of [`MemberRecord`]s. The graph may be
//! cyclic and arbitrarily deep, so the walk keeps an explicit frame stack
//! and a [`VisitedSet`] shared across every seed of one invocation.

pub mod seeds;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::context::ServiceContext;
use crate::model::{DirectoryMember, GroupRef, MemberRecord, MemberType};

pub use seeds::resolve_seed_names;

/// Group ids already expanded during one traversal.
#[derive(Debug, Default)]
pub struct VisitedSet {
    ids: HashSet<String>,
}

impl VisitedSet {
    /// Marks `id` as expanded. Returns `false` if it already was.
    pub fn mark(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    /// Returns `true` if `id` has been marked.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

/// What a skipped item was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    /// A group whose metadata or member list could not be read.
    Group,
    /// A single member whose details could not be resolved.
    Member,
}

/// A group or member left out of the result, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Object id of the skipped group or member.
    pub id: String,
    /// Group or member.
    pub kind: SkipKind,
    /// Underlying failure message.
    pub reason: String,
}

/// Accumulated result of one traversal.
#[derive(Debug, Default)]
pub struct Traversal {
    /// Discovered members in depth-first order.
    pub members: Vec<MemberRecord>,
    /// Groups whose member list was read, in expansion order.
    pub expanded: Vec<GroupRef>,
    /// Groups and members that were skipped.
    pub skipped: Vec<Skipped>,
    visited: VisitedSet,
}

impl Traversal {
    /// Returns `true` if the group id was expanded (or attempted) in this run.
    #[must_use]
    pub fn visited(&self, group_id: &str) -> bool {
        self.visited.contains(group_id)
    }

    fn skip(&mut self, id: &str, kind: SkipKind, reason: String) {
        self.skipped.push(Skipped { id: id.to_string(), kind, reason });
    }
}

/// An open group on the traversal stack.
struct Frame {
    group: GroupRef,
    depth: u32,
    members: std::vec::IntoIter<DirectoryMember>,
}

/// Resolves the members of every seed group.
///
/// Seeds are processed in order and share one visited set, so a group
/// reachable from several seeds (or from itself) is expanded once. Failures
/// are contained: an unreadable group loses only its own subtree, an
/// unresolvable user is skipped while its siblings are still recorded.
pub async fn resolve(ctx: &ServiceContext, seed_ids: &[String], expand_nested: bool) -> Traversal {
    let mut traversal = Traversal::default();

    for seed_id in seed_ids {
        if !traversal.visited.mark(seed_id) {
            debug!(group_id = %seed_id, "seed group already expanded, skipping");
            continue;
        }
        let group = match ctx.directory.resolve_group(seed_id).await {
            Ok(group) => group,
            Err(e) => {
                warn!(group_id = %seed_id, error = %e, "failed to resolve seed group");
                traversal.skip(seed_id, SkipKind::Group, e.to_string());
                continue;
            }
        };
        info!(group = %group.display_name, group_id = %group.id, "resolving group members");
        walk(ctx, &mut traversal, group, expand_nested).await;
    }

    info!(
        members = traversal.members.len(),
        groups = traversal.expanded.len(),
        skipped = traversal.skipped.len(),
        "membership resolution finished"
    );
    traversal
}

/// Depth-first walk below an already-marked root group.
async fn walk(ctx: &ServiceContext, traversal: &mut Traversal, root: GroupRef, expand_nested: bool) {
    let mut stack: Vec<Frame> = Vec::new();
    if let Some(frame) = open(ctx, traversal, root, 0).await {
        stack.push(frame);
    }

    while let Some(frame) = stack.last_mut() {
        let Some(member) = frame.members.next() else {
            stack.pop();
            continue;
        };
        let parent = frame.group.clone();
        let depth = frame.depth;

        match member.member_type {
            MemberType::User => match ctx.directory.resolve_user(&member.id).await {
                Ok(user) => {
                    traversal.members.push(MemberRecord::user(user, &parent, depth));
                }
                Err(e) => {
                    warn!(
                        user_id = %member.id,
                        group = %parent.display_name,
                        error = %e,
                        "failed to resolve user, skipping"
                    );
                    traversal.skip(&member.id, SkipKind::Member, e.to_string());
                }
            },
            MemberType::Group if expand_nested => {
                let nested = match ctx.directory.resolve_group(&member.id).await {
                    Ok(nested) => nested,
                    Err(e) => {
                        // An unresolvable group still counts as visited.
                        if traversal.visited.mark(&member.id) {
                            warn!(
                                group_id = %member.id,
                                parent = %parent.display_name,
                                error = %e,
                                "failed to resolve nested group, skipping"
                            );
                            traversal.skip(&member.id, SkipKind::Group, e.to_string());
                        } else {
                            debug!(group_id = %member.id, "unresolvable group already reported");
                        }
                        continue;
                    }
                };
                traversal.members.push(MemberRecord::group(&nested, &parent, depth));

                if !traversal.visited.mark(&nested.id) {
                    debug!(group_id = %nested.id, "group already expanded, not descending again");
                    continue;
                }
                debug!(group = %nested.display_name, depth = depth + 1, "descending into nested group");
                if let Some(child) = open(ctx, traversal, nested, depth + 1).await {
                    stack.push(child);
                }
            }
            MemberType::Group => {
                debug!(group_id = %member.id, "nested group not expanded");
            }
            MemberType::Other(ref tag) => {
                debug!(member_id = %member.id, member_type = %tag, "ignoring non-user member");
            }
        }
    }
}

/// Reads a group's direct members and turns them into a stack frame.
async fn open(
    ctx: &ServiceContext,
    traversal: &mut Traversal,
    group: GroupRef,
    depth: u32,
) -> Option<Frame> {
    match ctx.directory.list_group_members(&group.id).await {
        Ok(members) => {
            debug!(group = %group.display_name, count = members.len(), "listed direct members");
            traversal.expanded.push(group.clone());
            Some(Frame { group, depth, members: members.into_iter() })
        }
        Err(e) => {
            warn!(group_id = %group.id, group = %group.display_name, error = %e, "failed to list group members");
            traversal.skip(&group.id, SkipKind::Group, e.to_string());
            None
        }
    }
}
