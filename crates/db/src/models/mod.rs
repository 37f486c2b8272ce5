pub mod payment_intent;

pub use payment_intent::*;
