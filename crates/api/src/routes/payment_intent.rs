use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use swimbuddz_readiness::CachedPaymentIntent;
use swimbuddz_services::MemberRepository;
use validator::Validate;

use crate::{error::ApiError, extractors::auth::AuthMember, state::AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct SavePaymentIntentRequest {
    #[validate(length(min = 1, max = 64))]
    pub purpose: String,
    #[validate(length(min = 1, max = 128))]
    pub reference: Option<String>,
    #[validate(url)]
    pub checkout_url: Option<String>,
}

// ---- GET /api/members/me/payment-intent ----------------------------------

pub async fn get(
    State(state): State<AppState>,
    auth: AuthMember,
) -> Result<Json<CachedPaymentIntent>, ApiError> {
    let member_key = state.members.member_key(&auth.token).await?;
    let intent = state
        .payment_intents
        .get(&member_key)
        .await?
        .ok_or_else(|| ApiError::NotFound("No pending payment".to_string()))?;

    Ok(Json(intent))
}

// ---- PUT /api/members/me/payment-intent ----------------------------------

pub async fn save(
    State(state): State<AppState>,
    auth: AuthMember,
    Json(body): Json<SavePaymentIntentRequest>,
) -> Result<Json<CachedPaymentIntent>, ApiError> {
    body.validate()?;

    let member_key = state.members.member_key(&auth.token).await?;
    let intent = state
        .payment_intents
        .put(
            &member_key,
            CachedPaymentIntent {
                purpose: body.purpose,
                reference: body.reference,
                checkout_url: body.checkout_url,
            },
        )
        .await?;

    Ok(Json(intent))
}

// ---- DELETE /api/members/me/payment-intent -------------------------------

pub async fn clear(
    State(state): State<AppState>,
    auth: AuthMember,
) -> Result<StatusCode, ApiError> {
    let member_key = state.members.member_key(&auth.token).await?;
    state.payment_intents.clear(&member_key).await?;
    Ok(StatusCode::NO_CONTENT)
}
