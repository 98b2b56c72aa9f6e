pub mod post;

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{Router, middleware::from_fn_with_state, routing::post};

use post::buy_course;

/// `POST /buyCourse`, behind the bearer-token guard.
pub fn apply_course_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/buyCourse", post(buy_course))
        .route_layer(from_fn_with_state(app_state, allow_authenticated))
}
