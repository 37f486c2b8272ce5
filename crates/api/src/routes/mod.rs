pub mod payment_intent;
pub mod readiness;
