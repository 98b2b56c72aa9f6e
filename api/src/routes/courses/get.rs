use crate::auth::AuthUser;
use crate::response::{ApiError, ApiResponse};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Extension, State},
    response::IntoResponse,
};
use services::course_service::CourseService;

fn service(app_state: &AppState) -> CourseService {
    CourseService::new(app_state.db().clone(), app_state.media())
}

/// GET /api/fetchAllCourses
///
/// Every course, oldest first. Not filtered by owner or role.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "message": "Fetch All Courses Successfully",
///   "data": [
///     {
///       "id": 1,
///       "userId": 7,
///       "courseTitle": "Intro to Rust",
///       "courseDescription": "Ownership and borrowing",
///       "price": 49.5,
///       "courseThumbnail": "https://...",
///       "material_1": "https://...",
///       "createdAt": "...",
///       "updatedAt": "..."
///     }
///   ]
/// }
/// ```
pub async fn fetch_all_courses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = service(&app_state).fetch_all().await?;
    Ok(Json(ApiResponse::success(
        courses,
        "Fetch All Courses Successfully",
    )))
}

/// GET /api/fetchTeacherKPI
///
/// Counts for the caller: courses they own and enrollments in them.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "message": "Fetch Teacher KPI Successfully",
///   "data": { "totalCourse": 2, "totalStudents": 5 }
/// }
/// ```
pub async fn fetch_teacher_kpi(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let kpi = service(&app_state).teacher_kpi(user.id()).await?;
    Ok(Json(ApiResponse::success(kpi, "Fetch Teacher KPI Successfully")))
}

/// GET /api/fetchCourseByStudent
///
/// The caller's purchased courses in purchase order, as full course records.
pub async fn fetch_course_by_student(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = service(&app_state).courses_by_student(user.id()).await?;
    Ok(Json(ApiResponse::success(
        courses,
        "Fetch All Courses Successfully",
    )))
}
