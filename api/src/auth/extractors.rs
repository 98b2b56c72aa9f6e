use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, Validation, decode};
use services::AppError;

use crate::auth::claims::{AuthUser, Claims};
use crate::response::ApiError;
use crate::state::AppState;

/// Extracts `AuthUser` from a `Bearer` token in the `Authorization` header,
/// verified with the key held in [`AppState`].
///
/// # Errors
/// `401 Unauthorized` if the header is missing or malformed, or the token is
/// invalid or expired.
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Unauthorized("Missing or invalid Authorization header".into()))?;

        let app_state = AppState::from_ref(state);
        let token_data = decode::<Claims>(
            bearer.token(),
            app_state.decoding_key(),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(AuthUser(token_data.claims))
    }
}
