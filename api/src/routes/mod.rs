//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health`: health check (public)
//! - `auth`: `/userSignUp`, `/userLogin` (public), `/getUserProfile` (token)
//! - `courses`: `/uploadCourse`, `/fetchAllCourses`, `/fetchTeacherKPI`,
//!   `/fetchCourseByStudent` (token)
//! - `apply_course`: `/buyCourse` (token)

use crate::routes::{
    apply_course::apply_course_routes, auth::auth_routes, courses::course_routes,
    health::health_routes,
};
use crate::state::AppState;
use axum::Router;

pub mod apply_course;
pub mod auth;
pub mod common;
pub mod courses;
pub mod health;

/// Builds every `/api` route. The guard middleware needs the state up front,
/// so it is passed in here as well as attached by the caller.
pub fn routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .merge(auth_routes(app_state.clone()))
        .merge(course_routes(app_state.clone()))
        .merge(apply_course_routes(app_state))
}
