use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use swimbuddz_config::JwtSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Claims issued by the members API's auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
    #[serde(default)]
    pub iss: Option<String>,
}

/// Verifies HS256 tokens signed with the secret shared with the members API.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(jwt_settings: &JwtSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Provider tokens carry an audience we do not pin.
        validation.validate_aud = false;
        if let Some(issuer) = &jwt_settings.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(jwt_settings.secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
