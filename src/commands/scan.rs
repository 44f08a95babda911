//! The `scan` pipeline: seeds, traversal, verification, report.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::{ScanConfig, Seeds};
use crate::context::ServiceContext;
use crate::error::{ScanError, ScanResult};
use crate::membership::{self, resolve_seed_names};
use crate::model::{GroupRef, MemberRecord, UserToCheck};
use crate::report::{export_pdf, render_html, ScanSummary};
use crate::verify::verify;

/// What a finished scan produced.
#[derive(Debug)]
pub struct ScanOutput {
    /// Aggregates shown in the report.
    pub summary: ScanSummary,
    /// Where the HTML report was written.
    pub html_path: PathBuf,
    /// Where the PDF was written, if requested.
    pub pdf_path: Option<PathBuf>,
}

/// Runs a scan and prints where the report went.
///
/// # Errors
///
/// Returns the scan error as a display string.
pub async fn execute(ctx: &ServiceContext, config: &ScanConfig) -> Result<(), String> {
    let output = run(ctx, config).await.map_err(|e| e.to_string())?;
    let summary = &output.summary;

    println!(
        "Scanned {} groups: {} users, {} nested groups, {} with email",
        summary.groups_processed,
        summary.unique_users,
        summary.unique_nested_groups,
        summary.users_with_email
    );
    if summary.verified {
        println!(
            "Breached accounts: {} ({} breaches total, {} failed checks)",
            summary.breached_accounts, summary.total_breaches, summary.failed_checks
        );
    }
    println!("Report: {}", output.html_path.display());
    if let Some(pdf) = &output.pdf_path {
        println!("PDF: {}", pdf.display());
    }
    Ok(())
}

/// Runs the full pipeline against the ports in `ctx`.
///
/// # Errors
///
/// Fails only when the directory session cannot be established, no seed
/// group could be read, or the report cannot be produced. Individual
/// groups, members and lookups that fail are logged and skipped.
pub async fn run(ctx: &ServiceContext, config: &ScanConfig) -> ScanResult<ScanOutput> {
    ctx.directory.connect().await.map_err(ScanError::Connect)?;
    info!("connected to directory");

    let seed_ids = match &config.seeds {
        Seeds::Ids(ids) => ids.clone(),
        Seeds::Names(names) => {
            resolve_seed_names(ctx, names).await?.into_iter().map(|g| g.id).collect()
        }
    };

    let traversal = membership::resolve(ctx, &seed_ids, config.expand_nested).await;
    let seeds: Vec<GroupRef> = traversal
        .expanded
        .iter()
        .filter(|g| seed_ids.contains(&g.id))
        .cloned()
        .collect();
    if seeds.is_empty() {
        return Err(ScanError::NoValidGroups);
    }
    if !traversal.skipped.is_empty() {
        let ids: Vec<&str> = traversal.skipped.iter().map(|s| s.id.as_str()).collect();
        warn!(count = ids.len(), ids = ?ids, "some groups or members were skipped");
    }

    let users = users_to_check(&traversal.members);
    let outcomes = match config.api_key.as_deref() {
        Some(api_key) if !config.skip_breach_check => {
            Some(verify(ctx, &users, config.rate, api_key).await)
        }
        _ => {
            info!(users = users.len(), "breach verification skipped");
            None
        }
    };

    let summary =
        ScanSummary::compute(traversal.expanded.len(), &traversal.members, outcomes.as_deref());
    let html = render_html(ctx.clock.now(), &seeds, &traversal.members, outcomes.as_deref(), &summary);
    ctx.fs
        .write(&config.output, &html)
        .map_err(|e| ScanError::Report(format!("failed to write {}: {e}", config.output.display())))?;
    info!(path = %config.output.display(), "HTML report written");

    let pdf_path = match &config.pdf_browser {
        Some(browser) => Some(export_pdf(ctx, browser, &config.output)?),
        None => None,
    };

    Ok(ScanOutput { summary, html_path: config.output.clone(), pdf_path })
}

/// Users that carry an email, one per address ignoring case, first seen wins.
#[must_use]
pub fn users_to_check(members: &[MemberRecord]) -> Vec<UserToCheck> {
    let mut seen = HashSet::new();
    members
        .iter()
        .filter(|m| m.is_user())
        .filter_map(|m| m.email.as_ref().map(|email| (m, email)))
        .filter(|(_, email)| seen.insert(email.to_lowercase()))
        .map(|(m, email)| UserToCheck {
            email: email.clone(),
            display_name: m.display_name.clone(),
            department: m.department.clone(),
            parent_group: m.parent_group_name.clone(),
        })
        .collect()
}
