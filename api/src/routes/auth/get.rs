use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, State},
    response::IntoResponse,
};
use services::user_service::UserService;

/// GET /api/getUserProfile
///
/// Returns the caller's profile. The password hash is never included.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "message": "Fetch User Profile Successfully",
///   "data": {
///     "id": 1,
///     "name": "Ada Lovelace",
///     "email": "ada@example.com",
///     "role": "Teacher",
///     "cvImage": null,
///     "createdAt": "2026-01-10T12:00:00Z",
///     "updatedAt": "2026-01-10T12:00:00Z"
///   }
/// }
/// ```
pub async fn get_user_profile(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let service = UserService::new(app_state.db().clone(), app_state.media());
    let profile = service.profile(user.id()).await?;

    Ok(Json(ApiResponse::success(
        profile,
        "Fetch User Profile Successfully",
    )))
}
