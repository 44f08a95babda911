//! Rate-limited breach verification.
//!
//! Users are checked strictly one after another. After every lookup,
//! successful or not, the verifier sleeps for the delay derived from the
//! declared [`RateTier`]. There is no burst allowance and no backoff.

mod normalize;
mod rate;

use tracing::{info, warn};

use crate::context::ServiceContext;
use crate::model::{BreachEntry, BreachOutcome, BreachStatus, UserToCheck};

pub use normalize::normalize_breaches;
pub use rate::{compute_delay, RateTier};

/// Checks every user against the breach lookup and returns one outcome each.
///
/// A failing lookup yields a [`BreachStatus::Error`] outcome for that user
/// and the batch carries on. An empty input returns immediately without
/// calling the lookup or sleeping.
pub async fn verify(
    ctx: &ServiceContext,
    users: &[UserToCheck],
    rate: RateTier,
    api_key: &str,
) -> Vec<BreachOutcome> {
    if users.is_empty() {
        info!("no users with an email address, skipping breach verification");
        return Vec::new();
    }

    let delay = rate.delay();
    info!(
        users = users.len(),
        rate_per_minute = rate.per_minute(),
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "starting breach verification"
    );

    let mut outcomes = Vec::with_capacity(users.len());
    for (index, user) in users.iter().enumerate() {
        let result = ctx.breaches.check_breaches(&user.email, api_key).await;
        let outcome = match result {
            Ok(records) => {
                let breaches = normalize_breaches(records);
                let status =
                    if breaches.is_empty() { BreachStatus::Clean } else { BreachStatus::Breached };
                outcome_for(user, status, breaches, None)
            }
            Err(e) => {
                warn!(email = %user.email, error = %e, "breach lookup failed");
                outcome_for(user, BreachStatus::Error, Vec::new(), Some(e.to_string()))
            }
        };
        info!(
            position = index + 1,
            total = users.len(),
            email = %outcome.email,
            status = outcome.status.label(),
            breaches = outcome.breach_count,
            "checked account"
        );
        outcomes.push(outcome);

        ctx.clock.sleep(delay).await;
    }

    outcomes
}

fn outcome_for(
    user: &UserToCheck,
    status: BreachStatus,
    breaches: Vec<BreachEntry>,
    error: Option<String>,
) -> BreachOutcome {
    BreachOutcome {
        email: user.email.clone(),
        display_name: user.display_name.clone(),
        department: user.department.clone(),
        parent_group: user.parent_group.clone(),
        status,
        breach_count: breaches.len(),
        breaches,
        error,
    }
}
