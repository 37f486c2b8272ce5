use dashmap::DashMap;
use mongodb::Database;
use swimbuddz_db::models::PaymentIntent;
use swimbuddz_readiness::CachedPaymentIntent;
use tracing::{debug, info};

use crate::dao::{base::DaoResult, payment_intent::PaymentIntentDao};

/// Resumable checkout references, persisted in MongoDB with an in-memory
/// read-through layer. Keyed by member key.
///
/// The in-memory layer is per process. Writes from another replica are only
/// seen here after this replica's next write or a restart.
pub struct PaymentIntentCache {
    dao: PaymentIntentDao,
    slots: IntentSlots,
}

impl PaymentIntentCache {
    pub fn new(db: &Database) -> Self {
        Self {
            dao: PaymentIntentDao::new(db),
            slots: IntentSlots::default(),
        }
    }

    pub async fn get(&self, member_key: &str) -> DaoResult<Option<CachedPaymentIntent>> {
        if let Some(intent) = self.slots.cached(member_key) {
            return Ok(Some(intent));
        }

        // Misses are not cached; another replica may write the intent.
        let seen = self.slots.version(member_key);
        let Some(stored) = self.dao.find_by_member(member_key).await? else {
            return Ok(None);
        };
        let intent = to_cached(&stored);
        if self.slots.fill(member_key, seen, intent.clone()) {
            debug!(member_key, purpose = %intent.purpose, "Loaded payment intent");
        } else {
            debug!(member_key, "Payment intent changed during load, not caching");
        }
        Ok(Some(intent))
    }

    pub async fn put(
        &self,
        member_key: &str,
        intent: CachedPaymentIntent,
    ) -> DaoResult<CachedPaymentIntent> {
        let stored = self
            .dao
            .upsert(
                member_key,
                &intent.purpose,
                intent.reference.as_deref(),
                intent.checkout_url.as_deref(),
            )
            .await?;

        let intent = to_cached(&stored);
        self.slots.store(member_key, intent.clone());
        info!(member_key, purpose = %intent.purpose, "Saved payment intent");
        Ok(intent)
    }

    /// Returns whether an intent was removed.
    pub async fn clear(&self, member_key: &str) -> DaoResult<bool> {
        self.slots.evict(member_key);
        let removed = self.dao.delete_by_member(member_key).await;
        // Loads that overlapped the delete may have filled the slot again.
        self.slots.evict(member_key);

        let removed = removed?;
        if removed {
            info!(member_key, "Cleared payment intent");
        }
        Ok(removed)
    }
}

/// Cached intents plus a per-key write counter. A load only fills its slot
/// when no write happened since the load started.
#[derive(Default)]
struct IntentSlots {
    intents: DashMap<String, CachedPaymentIntent>,
    versions: DashMap<String, u64>,
}

impl IntentSlots {
    fn cached(&self, member_key: &str) -> Option<CachedPaymentIntent> {
        self.intents.get(member_key).map(|i| i.clone())
    }

    fn version(&self, member_key: &str) -> u64 {
        self.versions.get(member_key).map(|v| *v).unwrap_or(0)
    }

    /// Fills the slot from a load that started at version `seen`.
    fn fill(&self, member_key: &str, seen: u64, intent: CachedPaymentIntent) -> bool {
        // Holding the version entry keeps writers out until the fill lands.
        let version = self.versions.entry(member_key.to_string()).or_insert(0);
        if *version != seen {
            return false;
        }
        self.intents.insert(member_key.to_string(), intent);
        true
    }

    fn store(&self, member_key: &str, intent: CachedPaymentIntent) {
        let mut version = self.versions.entry(member_key.to_string()).or_insert(0);
        *version += 1;
        self.intents.insert(member_key.to_string(), intent);
    }

    fn evict(&self, member_key: &str) {
        let mut version = self.versions.entry(member_key.to_string()).or_insert(0);
        *version += 1;
        self.intents.remove(member_key);
    }
}

fn to_cached(stored: &PaymentIntent) -> CachedPaymentIntent {
    CachedPaymentIntent {
        purpose: stored.purpose.clone(),
        reference: stored.reference.clone(),
        checkout_url: stored.checkout_url.clone(),
    }
}
