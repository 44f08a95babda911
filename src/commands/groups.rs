//! The `groups` listing.

use crate::context::ServiceContext;
use crate::error::ScanError;
use crate::model::GroupRef;

/// Lists directory groups, optionally narrowed by a name substring.
///
/// # Errors
///
/// Returns an error string if the directory cannot be reached.
pub async fn run(ctx: &ServiceContext, filter: Option<&str>) -> Result<(), String> {
    ctx.directory.connect().await.map_err(|e| ScanError::Connect(e).to_string())?;
    let groups = ctx.directory.list_all_groups().await.map_err(|e| format!("failed to list groups: {e}"))?;

    let groups = matching(groups, filter);
    if groups.is_empty() {
        println!("No groups found.");
        return Ok(());
    }

    let width = groups.iter().map(|g| g.id.len()).max().unwrap_or(0);
    for group in &groups {
        println!("{:<width$}  {}", group.id, group.display_name);
    }
    Ok(())
}

/// Keeps groups whose name contains `filter` ignoring case, sorted by name.
fn matching(groups: Vec<GroupRef>, filter: Option<&str>) -> Vec<GroupRef> {
    let needle = filter.map(str::to_lowercase);
    let mut groups: Vec<GroupRef> = groups
        .into_iter()
        .filter(|g| needle.as_ref().map_or(true, |n| g.display_name.to_lowercase().contains(n)))
        .collect();
    groups.sort_by(|a, b| a.display_name.to_lowercase().cmp(&b.display_name.to_lowercase()));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{make_test_context, FakeDirectory};

    fn group(id: &str, name: &str) -> GroupRef {
        GroupRef { id: id.into(), display_name: name.into() }
    }

    #[test]
    fn filters_and_sorts_by_name() {
        let groups = vec![group("3", "West Sales"), group("1", "Finance"), group("2", "sales-emea")];
        let names: Vec<String> =
            matching(groups, Some("SALES")).into_iter().map(|g| g.display_name).collect();
        assert_eq!(names, vec!["sales-emea", "West Sales"]);
    }

    #[tokio::test]
    async fn lists_through_the_directory() {
        let directory = FakeDirectory::new().with_group("g-1", "Sales");
        let calls = directory.calls();
        let ctx = make_test_context().with_directory(directory);

        run(&ctx, None).await.unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["connect", "list_all_groups"]);
    }
}
