use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::snapshot::Membership;

/// Nested membership levels, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Community,
    Club,
    Academy,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Community, Tier::Club, Tier::Academy];

    pub fn label(self) -> &'static str {
        match self {
            Tier::Community => "Community",
            Tier::Club => "Club",
            Tier::Academy => "Academy",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tiers whose paid-until timestamp lies strictly after `now`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveTiers {
    pub community: bool,
    pub club: bool,
    pub academy: bool,
}

impl ActiveTiers {
    pub fn at(membership: &Membership, now: DateTime<Utc>) -> Self {
        let active = |tier| membership.paid_until(tier).is_some_and(|until| until > now);
        Self {
            community: active(Tier::Community),
            club: active(Tier::Club),
            academy: active(Tier::Academy),
        }
    }

    pub fn contains(&self, tier: Tier) -> bool {
        match tier {
            Tier::Community => self.community,
            Tier::Club => self.club,
            Tier::Academy => self.academy,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.community || self.club || self.academy)
    }

    pub fn tiers(&self) -> Vec<Tier> {
        Tier::ALL.into_iter().filter(|t| self.contains(*t)).collect()
    }

    /// Active tiers for display. Falls back to Community when nothing is
    /// active; the fallback does not make the member active.
    pub fn display(&self) -> Vec<Tier> {
        if self.is_empty() {
            vec![Tier::Community]
        } else {
            self.tiers()
        }
    }
}
