pub mod base;
pub mod payment_intent;

pub use base::BaseDao;
