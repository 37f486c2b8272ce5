use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{Error as _, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ReadinessError;
use crate::tier::Tier;

/// Member record as returned by `GET /members/me`.
///
/// `membership` and `profile` must be present for evaluation; every leaf
/// field is optional and missing values only count as incomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub membership: Option<Membership>,
    pub profile: Option<Profile>,
    pub emergency_contact: Option<EmergencyContact>,
    pub availability: Option<Availability>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// Tiers the backend reports as active. Informational: activity is
    /// always derived from the paid-until timestamps, so tiers this service
    /// does not know are skipped.
    #[serde(default, deserialize_with = "known_tiers")]
    pub active_tiers: BTreeSet<Tier>,
    #[serde(default, deserialize_with = "nullable")]
    pub requested_tiers: BTreeSet<Tier>,
    #[serde(default, deserialize_with = "utc_or_naive")]
    pub community_paid_until: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "utc_or_naive")]
    pub club_paid_until: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "utc_or_naive")]
    pub academy_paid_until: Option<DateTime<Utc>>,
    /// Answers keyed by question; only key presence matters, so `null`
    /// answers are kept.
    pub academy_skill_assessment: Option<BTreeMap<String, Option<bool>>>,
    pub academy_goals: Option<String>,
    pub academy_preferred_coach_gender: Option<String>,
    pub academy_lesson_preference: Option<String>,
}

impl Membership {
    pub fn paid_until(&self, tier: Tier) -> Option<DateTime<Utc>> {
        match tier {
            Tier::Community => self.community_paid_until,
            Tier::Club => self.club_paid_until,
            Tier::Academy => self.academy_paid_until,
        }
    }

    pub fn requests(&self, tier: Tier) -> bool {
        self.requested_tiers.contains(&tier)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub photo_media_id: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub time_zone: Option<String>,
    pub swim_level: Option<String>,
    pub deep_water_comfort: Option<String>,
    pub personal_goals: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Availability {
    #[serde(default, deserialize_with = "nullable")]
    pub preferred_locations: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub preferred_times: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub available_days: Vec<String>,
}

static NO_EMERGENCY_CONTACT: EmergencyContact = EmergencyContact {
    name: None,
    relationship: None,
    phone: None,
};

static NO_AVAILABILITY: Availability = Availability {
    preferred_locations: Vec::new(),
    preferred_times: Vec::new(),
    available_days: Vec::new(),
};

/// Borrowed snapshot with the required containers checked and the optional
/// ones defaulted.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotView<'a> {
    pub membership: &'a Membership,
    pub profile: &'a Profile,
    pub emergency_contact: &'a EmergencyContact,
    pub availability: &'a Availability,
}

impl MemberSnapshot {
    pub fn view(&self) -> Result<SnapshotView<'_>, ReadinessError> {
        let membership = self
            .membership
            .as_ref()
            .ok_or(ReadinessError::InvalidSnapshot("membership"))?;
        let profile = self
            .profile
            .as_ref()
            .ok_or(ReadinessError::InvalidSnapshot("profile"))?;

        Ok(SnapshotView {
            membership,
            profile,
            emergency_contact: self.emergency_contact.as_ref().unwrap_or(&NO_EMERGENCY_CONTACT),
            availability: self.availability.as_ref().unwrap_or(&NO_AVAILABILITY),
        })
    }

    /// Key for member-scoped local state: the id, or the email when the id
    /// is missing.
    pub fn member_key(&self) -> Option<&str> {
        [self.id.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .find(|k| !k.is_empty())
    }
}

/// Treats an explicit `null` like a missing key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeTier {
    Known(Tier),
    Unknown(IgnoredAny),
}

fn known_tiers<'de, D>(deserializer: D) -> Result<BTreeSet<Tier>, D::Error>
where
    D: Deserializer<'de>,
{
    let tiers: Vec<MaybeTier> = nullable(deserializer)?;
    Ok(tiers
        .into_iter()
        .filter_map(|t| match t {
            MaybeTier::Known(tier) => Some(tier),
            MaybeTier::Unknown(_) => None,
        })
        .collect())
}

/// RFC 3339 timestamps, or offset-less ones read as UTC.
fn utc_or_naive<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| D::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
}
