use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::AppError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";

/// Standardized envelope for every JSON response.
///
/// ```json
/// {
///   "success": true,
///   "message": "Fetch All Courses Successfully",
///   "data": [ ... ]
/// }
/// ```
///
/// `data` is left out entirely when there is nothing to return, e.g. on
/// errors or on a bare acknowledgement.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Boundary wrapper that turns a service failure into an HTTP response.
///
/// Internal failures are logged with their cause and answered with a
/// generic message.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AppError::Validation(_) | AppError::MissingAttachment(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_)
            | AppError::Media(_)
            | AppError::PasswordHash(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if self.0.is_internal() {
            tracing::error!(error = %self.0, "Request failed");
            INTERNAL_ERROR_MESSAGE.to_owned()
        } else {
            self.0.to_string()
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}
