//! Field-completeness predicates and the gates built from them.

use crate::snapshot::{Availability, EmergencyContact, Membership, Profile, SnapshotView};
use crate::tier::{ActiveTiers, Tier};

/// Skill-assessment keys; any one of them counts as an assessment.
pub const ASSESSMENT_KEYS: [&str; 4] = ["canFloat", "headUnderwater", "deepWaterComfort", "canSwim25m"];

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

fn non_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

pub fn has_profile_basics(profile: &Profile) -> bool {
    present(&profile.photo_media_id) && present(&profile.gender) && present(&profile.date_of_birth)
}

pub fn has_location(profile: &Profile) -> bool {
    present(&profile.country) && present(&profile.city) && present(&profile.time_zone)
}

pub fn has_core_profile(profile: &Profile) -> bool {
    present(&profile.phone) && has_location(profile)
}

pub fn has_swim_background(profile: &Profile) -> bool {
    present(&profile.swim_level)
        && present(&profile.deep_water_comfort)
        && non_blank(&profile.personal_goals)
}

pub fn has_safety_logistics(contact: &EmergencyContact, availability: &Availability) -> bool {
    present(&contact.name)
        && present(&contact.relationship)
        && present(&contact.phone)
        && !availability.preferred_locations.is_empty()
        && !availability.preferred_times.is_empty()
}

pub fn has_club_availability(availability: &Availability) -> bool {
    !availability.available_days.is_empty()
}

/// Key presence only: an assessment answering `false` everywhere still
/// counts.
pub fn has_assessment(membership: &Membership) -> bool {
    membership
        .academy_skill_assessment
        .as_ref()
        .is_some_and(|a| ASSESSMENT_KEYS.iter().any(|k| a.contains_key(*k)))
}

pub fn has_academy_details(membership: &Membership) -> bool {
    has_assessment(membership)
        && present(&membership.academy_goals)
        && present(&membership.academy_preferred_coach_gender)
        && present(&membership.academy_lesson_preference)
}

/// Which tier requirements apply to this member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierContext {
    pub wants_club: bool,
    pub wants_academy: bool,
    pub club_context: bool,
    pub academy_context: bool,
}

impl TierContext {
    pub fn new(membership: &Membership, active: ActiveTiers) -> Self {
        let wants_academy = membership.requests(Tier::Academy);
        // Academy implies a club-level commitment.
        let wants_club = membership.requests(Tier::Club) || wants_academy;
        Self {
            wants_club,
            wants_academy,
            club_context: wants_club || active.club || active.academy,
            academy_context: wants_academy || active.academy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessFacts {
    pub has_profile_basics: bool,
    pub has_location: bool,
    pub has_core_profile: bool,
    pub has_swim_background: bool,
    pub has_safety_logistics: bool,
    pub has_club_availability: bool,
    pub has_club_readiness: bool,
    pub has_assessment: bool,
    pub has_academy_readiness: bool,
}

impl ReadinessFacts {
    pub fn collect(view: &SnapshotView<'_>, ctx: &TierContext) -> Self {
        let has_club_availability = has_club_availability(view.availability);
        Self {
            has_profile_basics: has_profile_basics(view.profile),
            has_location: has_location(view.profile),
            has_core_profile: has_core_profile(view.profile),
            has_swim_background: has_swim_background(view.profile),
            has_safety_logistics: has_safety_logistics(view.emergency_contact, view.availability),
            has_club_availability,
            has_club_readiness: !ctx.club_context || has_club_availability,
            has_assessment: has_assessment(view.membership),
            has_academy_readiness: !ctx.academy_context || has_academy_details(view.membership),
        }
    }

    /// Profile, safety and swim data required of every member.
    pub fn profile_setup_complete(&self) -> bool {
        self.has_profile_basics
            && self.has_core_profile
            && self.has_safety_logistics
            && self.has_swim_background
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gates {
    pub needs_profile_core: bool,
    pub needs_club_readiness: bool,
    pub needs_academy_readiness: bool,
    pub onboarding_ready_for_payment: bool,
}

impl Gates {
    pub fn new(facts: &ReadinessFacts, ctx: &TierContext) -> Self {
        // swim_level is covered by has_swim_background.
        let needs_profile_core = !(facts.has_profile_basics
            && facts.has_location
            && facts.has_safety_logistics
            && facts.has_swim_background);

        Self {
            needs_profile_core,
            needs_club_readiness: ctx.club_context && !facts.has_club_availability,
            needs_academy_readiness: ctx.academy_context && !facts.has_academy_readiness,
            onboarding_ready_for_payment: facts.profile_setup_complete()
                && facts.has_club_readiness
                && facts.has_academy_readiness,
        }
    }

    pub fn needs_onboarding(&self) -> bool {
        !self.onboarding_ready_for_payment
    }
}
