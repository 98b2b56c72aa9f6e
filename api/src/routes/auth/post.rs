use crate::auth::{IssuedToken, generate_jwt};
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::{collect_multipart, json_body};
use crate::state::AppState;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use services::{
    AppError,
    user_service::{SignUp, UserProfile, UserService},
};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: UserProfile,
    #[serde(flatten)]
    pub token: IssuedToken,
}

fn issue(app_state: &AppState, user: UserProfile) -> Result<AuthResponse, AppError> {
    let token = generate_jwt(app_state, user.id)
        .map_err(|e| AppError::Internal(format!("token encoding failed: {e}")))?;
    Ok(AuthResponse { user, token })
}

/// POST /api/userSignUp
///
/// Registers an account from a multipart form.
///
/// ### Multipart fields
/// - `name`, `email`, `password` (min 8 chars), `role` (`Teacher` | `Student`)
/// - `cvImage` (optional file): hosted on the media host as an image
///
/// ### Responses
/// - `201 Created` with the profile plus `token` and `expiresAt`
/// - `400 Bad Request`: first validation message, or `Unexpected field: <name>`
/// - `409 Conflict`: `User already exists`
pub async fn user_sign_up(
    State(app_state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = collect_multipart(multipart, &["cvImage"]).await?;

    let req = SignUp {
        name: form.text("name"),
        email: form.text("email"),
        password: form.text("password"),
        role: form.text("role"),
        cv_image: form.take_file("cvImage"),
    };

    let service = UserService::new(app_state.db().clone(), app_state.media());
    let user = service.sign_up(req).await?;
    let body = issue(&app_state, user)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(body, "User registered successfully")),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/userLogin
///
/// ### Request Body
/// ```json
/// { "email": "ada@example.com", "password": "correct-horse" }
/// ```
///
/// ### Responses
/// - `200 OK` with the profile plus `token` and `expiresAt`
/// - `401 Unauthorized`: `Invalid email or password`
pub async fn user_login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;

    let service = UserService::new(app_state.db().clone(), app_state.media());
    let user = service.login(&req.email, &req.password).await?;
    let body = issue(&app_state, user)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(body, "Login successful")),
    ))
}
