use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, response::IntoResponse, routing::get};

/// Builds the `/health` route group: a single unauthenticated `GET /health`.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET /api/health
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "message": "Health check passed",
///   "data": "OK"
/// }
/// ```
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK", "Health check passed"))
}
