//! Run aggregates and the static report.

pub mod html;
pub mod pdf;

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{BreachOutcome, BreachStatus, MemberKind, MemberRecord};

pub use html::render_html;
pub use pdf::{export_pdf, pdf_path_for};

/// Aggregate figures over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Groups whose member list was read.
    pub groups_processed: usize,
    /// Distinct user object ids discovered.
    pub unique_users: usize,
    /// Distinct nested group object ids discovered.
    pub unique_nested_groups: usize,
    /// Users that carried an email address.
    pub users_with_email: usize,
    /// Sum of breach counts over all outcomes.
    pub total_breaches: usize,
    /// Outcomes classified as breached.
    pub breached_accounts: usize,
    /// Outcomes whose lookup failed.
    pub failed_checks: usize,
    /// Whether breach verification ran at all.
    pub verified: bool,
}

impl ScanSummary {
    /// Computes the aggregates from the traversal and verification results.
    ///
    /// `outcomes` is `None` when verification was skipped.
    #[must_use]
    pub fn compute(
        groups_processed: usize,
        members: &[MemberRecord],
        outcomes: Option<&[BreachOutcome]>,
    ) -> Self {
        let distinct = |kind: MemberKind| {
            members
                .iter()
                .filter(|m| m.kind == kind)
                .map(|m| m.object_id.as_str())
                .collect::<HashSet<_>>()
                .len()
        };
        let users_with_email = members
            .iter()
            .filter(|m| m.is_user())
            .filter_map(|m| m.email.as_deref())
            .map(str::to_lowercase)
            .collect::<HashSet<_>>()
            .len();
        let verified = outcomes.is_some();
        let outcomes = outcomes.unwrap_or_default();
        let count = |status: BreachStatus| outcomes.iter().filter(|o| o.status == status).count();

        Self {
            groups_processed,
            unique_users: distinct(MemberKind::User),
            unique_nested_groups: distinct(MemberKind::Group),
            users_with_email,
            total_breaches: outcomes.iter().map(|o| o.breach_count).sum(),
            breached_accounts: count(BreachStatus::Breached),
            failed_checks: count(BreachStatus::Error),
            verified,
        }
    }
}
