use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReadinessError;
use crate::payment::CachedPaymentIntent;
use crate::predicates::{Gates, ReadinessFacts, TierContext};
use crate::snapshot::MemberSnapshot;
use crate::tier::{ActiveTiers, Tier};

/// The single next step surfaced to the member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    ContinueSetup,
    ResumePayment,
    ActivateCommunity,
    CompleteReadiness,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub key: String,
    pub done: bool,
    pub label: String,
}

impl ChecklistItem {
    fn new(key: &str, done: bool, label: &str) -> Self {
        Self {
            key: key.to_string(),
            done,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResult {
    pub tier_label: String,
    pub active_tiers: Vec<Tier>,
    pub progress_percent: u8,
    pub checklist: Vec<ChecklistItem>,
    pub needs_onboarding: bool,
    pub onboarding_ready_for_payment: bool,
    pub needs_profile_core: bool,
    pub needs_club_readiness: bool,
    pub needs_academy_readiness: bool,
    pub primary_action: PrimaryAction,
    /// Checkout to reopen when `primary_action` is `resume_payment`.
    pub resume_checkout_url: Option<String>,
}

/// Computes the dashboard readiness state for one member at `now`.
///
/// `payment_intent` is the member's cached checkout, if any; only a
/// `community_annual` intent affects the result.
pub fn evaluate(
    snapshot: &MemberSnapshot,
    payment_intent: Option<&CachedPaymentIntent>,
    now: DateTime<Utc>,
) -> Result<ReadinessResult, ReadinessError> {
    let view = snapshot.view()?;
    let active = ActiveTiers::at(view.membership, now);
    let ctx = TierContext::new(view.membership, active);
    let facts = ReadinessFacts::collect(&view, &ctx);
    let gates = Gates::new(&facts, &ctx);

    let resumable = payment_intent.filter(|i| i.is_community_annual());
    let primary_action = primary_action(&facts, &gates, &ctx, active, resumable.is_some());
    let resume_checkout_url = match primary_action {
        PrimaryAction::ResumePayment => resumable.and_then(|i| i.checkout_url.clone()),
        _ => None,
    };

    Ok(ReadinessResult {
        tier_label: tier_label(&ctx, active).to_string(),
        active_tiers: active.display(),
        progress_percent: progress(&gates, &ctx, active),
        checklist: checklist(&facts, &ctx, active),
        needs_onboarding: gates.needs_onboarding(),
        onboarding_ready_for_payment: gates.onboarding_ready_for_payment,
        needs_profile_core: gates.needs_profile_core,
        needs_club_readiness: gates.needs_club_readiness,
        needs_academy_readiness: gates.needs_academy_readiness,
        primary_action,
        resume_checkout_url,
    })
}

/// A pending higher tier wins over an active lower one.
fn tier_label(ctx: &TierContext, active: ActiveTiers) -> &'static str {
    if ctx.wants_academy && !active.academy {
        "Academy (Pending)"
    } else if ctx.wants_club && !active.club {
        "Club (Pending)"
    } else if active.academy {
        Tier::Academy.label()
    } else if active.club {
        Tier::Club.label()
    } else {
        Tier::Community.label()
    }
}

fn progress(gates: &Gates, ctx: &TierContext, active: ActiveTiers) -> u8 {
    let mut total = 2;
    let mut completed = 0;

    if !gates.needs_profile_core {
        completed += 1;
    }
    if active.community {
        completed += 1;
    }
    if ctx.club_context {
        total += 1;
        if !gates.needs_club_readiness {
            completed += 1;
        }
    }
    if ctx.academy_context {
        total += 1;
        if !gates.needs_academy_readiness {
            completed += 1;
        }
    }

    percent(completed, total)
}

/// `round(100 * completed / total)`, halves rounded up.
fn percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * completed + total) / (2 * total);
    rounded.min(100) as u8
}

fn primary_action(
    facts: &ReadinessFacts,
    gates: &Gates,
    ctx: &TierContext,
    active: ActiveTiers,
    has_resumable_intent: bool,
) -> PrimaryAction {
    if !facts.profile_setup_complete() {
        return PrimaryAction::ContinueSetup;
    }

    if !active.community {
        return if gates.onboarding_ready_for_payment && has_resumable_intent {
            PrimaryAction::ResumePayment
        } else {
            PrimaryAction::ActivateCommunity
        };
    }

    let pending_upgrade = (ctx.wants_club && !active.club) || (ctx.wants_academy && !active.academy);
    if pending_upgrade || gates.needs_club_readiness || gates.needs_academy_readiness {
        return PrimaryAction::CompleteReadiness;
    }

    PrimaryAction::None
}

fn checklist(facts: &ReadinessFacts, ctx: &TierContext, active: ActiveTiers) -> Vec<ChecklistItem> {
    let mut items = vec![
        ChecklistItem::new(
            "profile_basics",
            facts.has_profile_basics,
            "Add a profile photo, gender and date of birth",
        ),
        ChecklistItem::new(
            "core_profile",
            facts.has_core_profile,
            "Add your phone number and location",
        ),
        ChecklistItem::new(
            "swim_background",
            facts.has_swim_background,
            "Tell us about your swimming and goals",
        ),
        ChecklistItem::new(
            "safety_logistics",
            facts.has_safety_logistics,
            "Add an emergency contact and session preferences",
        ),
    ];

    if ctx.club_context {
        items.push(ChecklistItem::new(
            "club_availability",
            facts.has_club_availability,
            "Choose the days you can train with the club",
        ));
    }
    if ctx.academy_context {
        items.push(ChecklistItem::new(
            "academy_readiness",
            facts.has_academy_readiness,
            "Complete the academy skill assessment and lesson preferences",
        ));
    }

    items.push(ChecklistItem::new(
        "community_active",
        active.community,
        "Activate your Community membership",
    ));
    items
}
