//! Course routes. Every route requires a bearer token.
//!
//! - `POST /uploadCourse` → `upload_course`
//! - `GET /fetchAllCourses` → `fetch_all_courses`
//! - `GET /fetchTeacherKPI` → `fetch_teacher_kpi`
//! - `GET /fetchCourseByStudent` → `fetch_course_by_student`

pub mod get;
pub mod post;

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use get::{fetch_all_courses, fetch_course_by_student, fetch_teacher_kpi};
use post::upload_course;

pub fn course_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/uploadCourse", post(upload_course))
        .route("/fetchAllCourses", get(fetch_all_courses))
        .route("/fetchTeacherKPI", get(fetch_teacher_kpi))
        .route("/fetchCourseByStudent", get(fetch_course_by_student))
        .route_layer(from_fn_with_state(app_state, allow_authenticated))
}
