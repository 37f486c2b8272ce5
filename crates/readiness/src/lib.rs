//! Membership readiness engine.
//!
//! Turns a member snapshot fetched from the members API into the onboarding
//! progress, checklist and next step shown on the member dashboard. Every
//! function here is pure: the current time is always passed in.

pub mod error;
pub mod evaluator;
pub mod payment;
pub mod predicates;
pub mod snapshot;
pub mod tier;

#[cfg(test)]
mod fixtures;

pub use error::ReadinessError;
pub use evaluator::{ChecklistItem, PrimaryAction, ReadinessResult, evaluate};
pub use payment::{COMMUNITY_ANNUAL_PURPOSE, CachedPaymentIntent};
pub use snapshot::{Availability, EmergencyContact, MemberSnapshot, Membership, Profile};
pub use tier::{ActiveTiers, Tier};
