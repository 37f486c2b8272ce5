use std::sync::Arc;

use chrono::{DateTime, Utc};
use swimbuddz_readiness::{ActiveTiers, MemberSnapshot, ReadinessError, ReadinessResult, evaluate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::members::{MemberFetchError, MemberRepository, member_key_of};
use crate::payment_cache::PaymentIntentCache;

#[derive(Debug, Error)]
pub enum ReadinessServiceError {
    #[error(transparent)]
    Member(#[from] MemberFetchError),
    #[error(transparent)]
    Snapshot(#[from] ReadinessError),
}

/// Joins the member record with the cached checkout and evaluates readiness.
pub struct ReadinessService {
    members: Arc<dyn MemberRepository>,
    payment_cache: Arc<PaymentIntentCache>,
}

impl ReadinessService {
    pub fn new(members: Arc<dyn MemberRepository>, payment_cache: Arc<PaymentIntentCache>) -> Self {
        Self {
            members,
            payment_cache,
        }
    }

    pub async fn evaluate_for(
        &self,
        bearer_token: &str,
        now: DateTime<Utc>,
    ) -> Result<ReadinessResult, ReadinessServiceError> {
        let snapshot = self.members.fetch_me(bearer_token).await?;
        let member_key = member_key_of(&snapshot)?;
        let member_key = member_key.as_str();

        // A failed cache lookup evaluates as if nothing were cached.
        let intent = self.payment_cache.get(member_key).await.unwrap_or_else(|e| {
            warn!(member_key, error = %e, "Payment intent lookup failed");
            None
        });

        let result = evaluate(&snapshot, intent.as_ref(), now)?;
        let active = snapshot
            .membership
            .as_ref()
            .map(|m| ActiveTiers::at(m, now))
            .unwrap_or_default();
        log_tier_drift(&snapshot, active);

        debug!(
            member_key,
            progress = result.progress_percent,
            action = ?result.primary_action,
            "Evaluated readiness"
        );

        if active.community && intent.as_ref().is_some_and(|i| i.is_community_annual()) {
            match self.payment_cache.clear(member_key).await {
                Ok(_) => info!(member_key, "Dropped settled community checkout"),
                Err(e) => warn!(member_key, error = %e, "Failed to drop settled checkout"),
            }
        }

        Ok(result)
    }
}

/// The backend's `active_tiers` list is informational; note when it
/// disagrees with the paid-until dates.
fn log_tier_drift(snapshot: &MemberSnapshot, active: ActiveTiers) {
    let Some(membership) = snapshot.membership.as_ref() else {
        return;
    };
    let derived = active.tiers();
    let reported: Vec<_> = membership.active_tiers.iter().copied().collect();
    if derived != reported {
        debug!(
            member_id = ?snapshot.id,
            ?reported,
            ?derived,
            "Reported active tiers differ from paid-until dates"
        );
    }
}
