use serde::{Deserialize, Serialize};

/// Purpose tag of the annual Community membership checkout.
pub const COMMUNITY_ANNUAL_PURPOSE: &str = "community_annual";

/// Pointer to an unfinished checkout, as held by the payment-intent cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedPaymentIntent {
    pub purpose: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
}

impl CachedPaymentIntent {
    pub fn is_community_annual(&self) -> bool {
        self.purpose == COMMUNITY_ANNUAL_PURPOSE
    }
}
