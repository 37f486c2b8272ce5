use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use tracing::debug;

use crate::{error::ApiError, state::AppState};

/// A caller holding a verified token. The raw token is forwarded to the
/// members API, which identifies the member.
#[derive(Debug, Clone)]
pub struct AuthMember {
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthMember
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Authorization header first, then the access_token cookie
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|s| s.to_string())
            .or_else(|| {
                parts
                    .headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|cookies| {
                        cookies.split(';').find_map(|cookie| {
                            cookie
                                .trim()
                                .strip_prefix("access_token=")
                                .map(|s| s.to_string())
                        })
                    })
            })
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

        let claims = app_state.tokens.verify(&token)?;
        debug!(sub = %claims.sub, "Authenticated request");

        Ok(AuthMember { token })
    }
}
