use std::collections::BTreeMap;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::snapshot::{Availability, EmergencyContact, MemberSnapshot, Membership, Profile};
use crate::tier::Tier;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn far_future() -> DateTime<Utc> {
    now() + Duration::days(3650)
}

pub fn membership_paid(tier: Tier, until: DateTime<Utc>) -> Membership {
    let mut membership = Membership::default();
    set_paid(&mut membership, tier, until);
    membership
}

pub fn set_paid(membership: &mut Membership, tier: Tier, until: DateTime<Utc>) {
    match tier {
        Tier::Community => membership.community_paid_until = Some(until),
        Tier::Club => membership.club_paid_until = Some(until),
        Tier::Academy => membership.academy_paid_until = Some(until),
    }
}

pub fn complete_academy(mut membership: Membership) -> Membership {
    membership.academy_skill_assessment = Some(BTreeMap::from([
        ("canFloat".to_string(), Some(true)),
        ("headUnderwater".to_string(), Some(true)),
        ("deepWaterComfort".to_string(), Some(false)),
        ("canSwim25m".to_string(), Some(true)),
    ]));
    membership.academy_goals = Some("Learn front crawl".into());
    membership.academy_preferred_coach_gender = Some("any".into());
    membership.academy_lesson_preference = Some("group".into());
    membership
}

/// Empty containers only: every leaf is missing.
pub fn empty_snapshot() -> MemberSnapshot {
    MemberSnapshot {
        membership: Some(Membership::default()),
        profile: Some(Profile::default()),
        emergency_contact: Some(EmergencyContact::default()),
        availability: Some(Availability::default()),
        ..Default::default()
    }
}

/// Every profile, safety and availability field filled, no tier paid.
pub fn complete_snapshot() -> MemberSnapshot {
    MemberSnapshot {
        id: Some("member-1".into()),
        email: Some("ada@swimbuddz.com".into()),
        first_name: Some("Ada".into()),
        last_name: Some("Obi".into()),
        membership: Some(Membership::default()),
        profile: Some(Profile {
            photo_media_id: Some("media-42".into()),
            gender: Some("female".into()),
            date_of_birth: Some("1994-05-17".into()),
            phone: Some("+2348012345678".into()),
            country: Some("Nigeria".into()),
            city: Some("Lagos".into()),
            time_zone: Some("Africa/Lagos".into()),
            swim_level: Some("beginner".into()),
            deep_water_comfort: Some("nervous".into()),
            personal_goals: Some("Swim a full length without stopping".into()),
        }),
        emergency_contact: Some(EmergencyContact {
            name: Some("Tunde Obi".into()),
            relationship: Some("brother".into()),
            phone: Some("+2348098765432".into()),
        }),
        availability: Some(Availability {
            preferred_locations: vec!["yaba".into()],
            preferred_times: vec!["weekend_morning".into()],
            available_days: vec!["saturday".into()],
        }),
    }
}

pub fn membership_mut(snapshot: &mut MemberSnapshot) -> &mut Membership {
    snapshot.membership.get_or_insert_with(Membership::default)
}
