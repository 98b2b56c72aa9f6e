use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::json_body;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use services::apply_course_service::ApplyCourseService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyCourseRequest {
    pub course_id: i64,
}

/// POST /api/buyCourse
///
/// Enrolls the calling student in a course. The teacher and price are taken
/// from the course itself.
///
/// ### Request Body
/// ```json
/// { "courseId": 3 }
/// ```
///
/// ### Responses
/// - `201 Created` with the enrollment (`Course Purchased Successfully`)
/// - `403 Forbidden`: `Only Student can buy a course`
/// - `404 Not Found`: `Course not found`
/// - `409 Conflict`: `Course already purchased`
pub async fn buy_course(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<BuyCourseRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = json_body(payload)?;

    let enrollment = ApplyCourseService::new(app_state.db().clone())
        .buy(user.id(), req.course_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            enrollment,
            "Course Purchased Successfully",
        )),
    ))
}
