use crate::error::AppError;
use crate::media::{self, MediaAsset, MediaHost, UploadedFile};
use crate::validation::{first_validation_message, format_validation_errors};
use db::models::{
    apply_course::Model as ApplyCourseModel,
    course::Model as CourseModel,
    user::{Model as UserModel, Permission},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::{Validate, ValidationError};

pub const ONLY_TEACHER_MESSAGE: &str = "Only Teacher can Upload a course";
pub const MISSING_THUMBNAIL_MESSAGE: &str = "Please Upload Course Thumbnail";
pub const MISSING_VIDEO_MESSAGE: &str = "Please Upload Atleast One Video";

/// A course upload as received from the caller: metadata text plus the raw
/// thumbnail and first video.
#[derive(Debug, Default, Validate)]
pub struct CourseUpload {
    #[validate(length(min = 1, message = "Course title is required"))]
    pub course_title: String,

    #[validate(length(min = 1, message = "Course description is required"))]
    pub course_description: String,

    #[validate(custom(function = "validate_price"))]
    pub price: String,

    pub course_thumbnail: Option<UploadedFile>,
    pub material_1: Option<UploadedFile>,
}

impl CourseUpload {
    const FIELD_ORDER: [&'static str; 3] = ["course_title", "course_description", "price"];
}

fn validate_price(price: &str) -> Result<(), ValidationError> {
    let message = match parse_price(price) {
        Some(_) => return Ok(()),
        None if price.trim().is_empty() => "Price is required",
        None => "Price must be a non-negative number",
    };
    Err(ValidationError::new("price").with_message(Cow::Borrowed(message)))
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherKpi {
    pub total_course: u64,
    pub total_students: u64,
}

pub struct CourseService {
    db: DatabaseConnection,
    media: Arc<dyn MediaHost>,
}

impl CourseService {
    pub fn new(db: DatabaseConnection, media: Arc<dyn MediaHost>) -> Self {
        Self { db, media }
    }

    /// Validates the upload, checks that the caller may publish courses,
    /// hosts the thumbnail and video, and stores the course.
    ///
    /// Assets already hosted for this upload are removed again if a later
    /// step fails.
    pub async fn upload(&self, caller_id: i64, upload: CourseUpload) -> Result<CourseModel, AppError> {
        if let Err(errors) = upload.validate() {
            debug!(
                caller_id,
                errors = %format_validation_errors(&errors),
                "Rejected course upload"
            );
            return Err(AppError::Validation(first_validation_message(
                &errors,
                &CourseUpload::FIELD_ORDER,
            )));
        }
        let price = parse_price(&upload.price)
            .ok_or_else(|| AppError::Validation("Price must be a non-negative number".into()))?;

        let caller = UserModel::find_by_id(&self.db, caller_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
        if !caller.role.permits(Permission::UploadCourse) {
            return Err(AppError::Forbidden(ONLY_TEACHER_MESSAGE.into()));
        }

        let thumbnail = upload
            .course_thumbnail
            .filter(|f| !f.is_empty())
            .ok_or(AppError::MissingAttachment(MISSING_THUMBNAIL_MESSAGE))?;
        let video = upload
            .material_1
            .filter(|f| !f.is_empty())
            .ok_or(AppError::MissingAttachment(MISSING_VIDEO_MESSAGE))?;

        let hosted_thumbnail = self.media.upload(MediaAsset::image(&thumbnail)).await?;
        let hosted_video = match self.media.upload(MediaAsset::video(&video)).await {
            Ok(hosted) => hosted,
            Err(e) => {
                media::discard(self.media.as_ref(), &[hosted_thumbnail]).await;
                return Err(e.into());
            }
        };

        let created = CourseModel::create(
            &self.db,
            caller.id,
            &upload.course_title,
            &upload.course_description,
            price,
            &hosted_thumbnail.url,
            &hosted_video.url,
        )
        .await;

        match created {
            Ok(course) => {
                info!(course_id = course.id, teacher_id = caller.id, "Course uploaded");
                Ok(course)
            }
            Err(e) => {
                media::discard(self.media.as_ref(), &[hosted_thumbnail, hosted_video]).await;
                Err(e.into())
            }
        }
    }

    /// Every course, for any authenticated caller.
    pub async fn fetch_all(&self) -> Result<Vec<CourseModel>, AppError> {
        Ok(CourseModel::find_all(&self.db).await?)
    }

    /// Courses owned by the caller and enrollments in them.
    pub async fn teacher_kpi(&self, caller_id: i64) -> Result<TeacherKpi, AppError> {
        let total_course = CourseModel::count_by_owner(&self.db, caller_id).await?;
        let total_students = ApplyCourseModel::count_by_teacher(&self.db, caller_id).await?;

        Ok(TeacherKpi {
            total_course,
            total_students,
        })
    }

    /// The courses a student has purchased, in enrollment order.
    pub async fn courses_by_student(&self, student_id: i64) -> Result<Vec<CourseModel>, AppError> {
        let rows = ApplyCourseModel::find_with_course_by_student(&self.db, student_id).await?;
        Ok(flatten_enrolled_courses(rows))
    }
}

/// Drops the enrollment side of each row. Rows whose course no longer
/// resolves are skipped.
fn flatten_enrolled_courses(rows: Vec<(ApplyCourseModel, Option<CourseModel>)>) -> Vec<CourseModel> {
    rows.into_iter()
        .filter_map(|(enrollment, course)| {
            if course.is_none() {
                warn!(
                    enrollment_id = enrollment.id,
                    course_id = enrollment.course_id,
                    "Enrollment references a missing course; skipping"
                );
            }
            course
        })
        .collect()
}
