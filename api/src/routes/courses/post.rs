use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::routes::common::collect_multipart;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, Multipart, State, multipart::MultipartRejection},
    response::IntoResponse,
};
use services::course_service::{CourseService, CourseUpload};

const THUMBNAIL_FIELD: &str = "courseThumbnail";
const VIDEO_FIELD: &str = "material_1";

/// POST /api/uploadCourse
///
/// Publishes a course. Only callers with the `Teacher` role may upload.
///
/// ### Multipart fields
/// - `courseTitle`, `courseDescription`, `price`
/// - `courseThumbnail` (file, required)
/// - `material_1` (file, required)
///
/// ### Responses
/// - `200 OK`
/// ```json
/// { "success": true, "message": "Course Uploaded Successfully" }
/// ```
/// - `400 Bad Request`: validation message, `Please Upload Course Thumbnail`,
///   `Please Upload Atleast One Video` or `Unexpected field: <name>`
/// - `403 Forbidden`: `Only Teacher can Upload a course`
/// - `500 Internal Server Error`: `Something went wrong`
pub async fn upload_course(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = collect_multipart(multipart, &[THUMBNAIL_FIELD, VIDEO_FIELD]).await?;

    let upload = CourseUpload {
        course_title: form.text("courseTitle"),
        course_description: form.text("courseDescription"),
        price: form.text("price"),
        course_thumbnail: form.take_file(THUMBNAIL_FIELD),
        material_1: form.take_file(VIDEO_FIELD),
    };

    let service = CourseService::new(app_state.db().clone(), app_state.media());
    service.upload(user.id(), upload).await?;

    Ok(Json(ApiResponse::ok("Course Uploaded Successfully")))
}
