pub mod auth;
pub mod dao;
pub mod members;
pub mod payment_cache;
pub mod readiness;

pub use auth::TokenVerifier;
pub use dao::*;
pub use members::{HttpMemberRepository, MemberFetchError, MemberRepository};
pub use payment_cache::PaymentIntentCache;
pub use readiness::ReadinessService;
