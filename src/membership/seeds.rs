//! Resolution of seed groups given by display name.

use tracing::{debug, info, warn};

use crate::context::ServiceContext;
use crate::error::{ScanError, ScanResult};
use crate::model::GroupRef;

/// Why a seed name could not be turned into a single group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSkip {
    /// No group carries the name.
    NotFound,
    /// More than one group matches and none is an unambiguous exact match.
    Ambiguous(usize),
    /// The directory search itself failed.
    Lookup(String),
}

/// Picks the one group a seed name refers to.
///
/// A single candidate is taken as-is. Several candidates are narrowed to
/// exact, case-sensitive display-name matches; anything other than exactly
/// one survivor is ambiguous. Ambiguous names are never guessed.
///
/// # Errors
///
/// Returns [`SeedSkip::NotFound`] for no candidates and
/// [`SeedSkip::Ambiguous`] when narrowing does not leave exactly one group.
pub fn pick_group(name: &str, candidates: Vec<GroupRef>) -> Result<GroupRef, SeedSkip> {
    let total = candidates.len();
    match total {
        0 => Err(SeedSkip::NotFound),
        1 => Ok(candidates.into_iter().next().ok_or(SeedSkip::NotFound)?),
        _ => {
            let mut exact: Vec<GroupRef> =
                candidates.into_iter().filter(|g| g.display_name == name).collect();
            if exact.len() == 1 {
                Ok(exact.remove(0))
            } else {
                Err(SeedSkip::Ambiguous(total))
            }
        }
    }
}

/// Searches for one seed name, falling back to a full group listing.
async fn candidates_for(ctx: &ServiceContext, name: &str) -> Result<Vec<GroupRef>, SeedSkip> {
    let found = ctx
        .directory
        .find_groups_by_display_name(name)
        .await
        .map_err(|e| SeedSkip::Lookup(e.to_string()))?;
    if !found.is_empty() {
        return Ok(found);
    }

    debug!(name, "display-name search returned nothing, scanning all groups");
    let all = ctx.directory.list_all_groups().await.map_err(|e| SeedSkip::Lookup(e.to_string()))?;
    Ok(all.into_iter().filter(|g| g.display_name.eq_ignore_ascii_case(name)).collect())
}

/// Resolves each seed name to exactly one group.
///
/// Names that match nothing, match ambiguously or fail to look up are
/// skipped with a warning; the others are returned in input order.
///
/// # Errors
///
/// Returns [`ScanError::NoValidGroups`] when no name could be resolved.
pub async fn resolve_seed_names(ctx: &ServiceContext, names: &[String]) -> ScanResult<Vec<GroupRef>> {
    let mut groups = Vec::new();

    for name in names {
        let picked = match candidates_for(ctx, name).await {
            Ok(candidates) => pick_group(name, candidates),
            Err(skip) => Err(skip),
        };
        match picked {
            Ok(group) => {
                info!(name = %name, group_id = %group.id, "resolved seed group");
                groups.push(group);
            }
            Err(SeedSkip::NotFound) => {
                warn!(name = %name, "no group found with this name, skipping");
            }
            Err(SeedSkip::Ambiguous(count)) => {
                warn!(
                    name = %name,
                    matches = count,
                    "group name is ambiguous, skipping; pass the group id instead"
                );
            }
            Err(SeedSkip::Lookup(message)) => {
                warn!(name = %name, error = %message, "group search failed, skipping");
            }
        }
    }

    if groups.is_empty() {
        return Err(ScanError::NoValidGroups);
    }
    Ok(groups)
}
