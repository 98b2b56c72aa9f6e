pub mod auth;
pub mod response;
pub mod routes;
pub mod state;

use crate::auth::middleware::log_request;
use crate::routes::routes;
use crate::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

/// The full application: `/api` routes, body limits, request logging and
/// permissive CORS.
pub fn app(app_state: AppState) -> Router {
    let max_body = app_state.max_upload_bytes();

    Router::new()
        .nest("/api", routes(app_state.clone()))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(from_fn(log_request))
        .layer(CorsLayer::very_permissive())
}
