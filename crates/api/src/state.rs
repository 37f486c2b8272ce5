use std::sync::Arc;

use mongodb::Database;
use swimbuddz_config::Settings;
use swimbuddz_services::{
    HttpMemberRepository, MemberFetchError, MemberRepository, PaymentIntentCache,
    ReadinessService, TokenVerifier,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub tokens: Arc<TokenVerifier>,
    pub members: Arc<dyn MemberRepository>,
    pub payment_intents: Arc<PaymentIntentCache>,
    pub readiness: Arc<ReadinessService>,
}

impl AppState {
    pub fn new(db: Database, settings: Settings) -> Result<Self, MemberFetchError> {
        let members = Arc::new(HttpMemberRepository::new(&settings.backend)?);
        Ok(Self::with_members(db, settings, members))
    }

    /// Builds the state around an arbitrary member source.
    pub fn with_members(
        db: Database,
        settings: Settings,
        members: Arc<dyn MemberRepository>,
    ) -> Self {
        let tokens = Arc::new(TokenVerifier::new(&settings.jwt));
        let payment_intents = Arc::new(PaymentIntentCache::new(&db));
        let readiness = Arc::new(ReadinessService::new(members.clone(), payment_intents.clone()));

        Self {
            settings,
            tokens,
            members,
            payment_intents,
            readiness,
        }
    }
}
