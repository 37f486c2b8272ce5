use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use swimbuddz_readiness::{CachedPaymentIntent, MemberSnapshot, ReadinessResult};

use crate::{error::ApiError, extractors::auth::AuthMember, state::AppState};

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub snapshot: MemberSnapshot,
    #[serde(default)]
    pub payment_intent: Option<CachedPaymentIntent>,
    /// Evaluation instant; defaults to server time.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

// ---- POST /api/readiness/evaluate (public) --------------------------------

pub async fn evaluate(Json(body): Json<EvaluateRequest>) -> Result<Json<ReadinessResult>, ApiError> {
    let now = body.now.unwrap_or_else(Utc::now);
    let result = swimbuddz_readiness::evaluate(&body.snapshot, body.payment_intent.as_ref(), now)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    Ok(Json(result))
}

// ---- GET /api/members/me/readiness (authenticated) ------------------------

pub async fn me(
    State(state): State<AppState>,
    auth: AuthMember,
) -> Result<Json<ReadinessResult>, ApiError> {
    let result = state
        .readiness
        .evaluate_for(&auth.token, Utc::now())
        .await?;

    Ok(Json(result))
}
