pub mod claims;
pub mod extractors;
pub mod guards;
pub mod middleware;

pub use claims::{AuthUser, Claims};

use crate::state::AppState;
use chrono::{Duration, Utc};
use jsonwebtoken::{Header, encode};
use serde::Serialize;

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: String,
}

/// Signs a token for `user_id` that expires after the configured lifetime.
pub fn generate_jwt(
    state: &AppState,
    user_id: i64,
) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
    let expiry = Utc::now() + Duration::minutes(state.jwt_duration_minutes());

    let claims = Claims {
        sub: user_id,
        exp: expiry.timestamp() as usize,
    };
    let token = encode(&Header::default(), &claims, state.encoding_key())?;

    Ok(IssuedToken {
        token,
        expires_at: expiry.to_rfc3339(),
    })
}
