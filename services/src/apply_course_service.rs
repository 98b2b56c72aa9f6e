use crate::error::AppError;
use db::models::{
    apply_course::Model as ApplyCourseModel,
    course::Model as CourseModel,
    user::{Model as UserModel, Permission},
};
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::info;

pub const ONLY_STUDENT_MESSAGE: &str = "Only Student can buy a course";
pub const COURSE_NOT_FOUND_MESSAGE: &str = "Course not found";
pub const ALREADY_PURCHASED_MESSAGE: &str = "Course already purchased";

pub struct ApplyCourseService {
    db: DatabaseConnection,
}

impl ApplyCourseService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enrolls the caller in a course. Teacher and price are taken from the
    /// course at the time of purchase.
    pub async fn buy(&self, student_id: i64, course_id: i64) -> Result<ApplyCourseModel, AppError> {
        let student = UserModel::find_by_id(&self.db, student_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;
        if !student.role.permits(Permission::BuyCourse) {
            return Err(AppError::Forbidden(ONLY_STUDENT_MESSAGE.into()));
        }

        let course = CourseModel::find_by_id(&self.db, course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(COURSE_NOT_FOUND_MESSAGE.into()))?;

        if ApplyCourseModel::exists_for(&self.db, student.id, course.id).await? {
            return Err(AppError::Conflict(ALREADY_PURCHASED_MESSAGE.into()));
        }

        let enrollment =
            ApplyCourseModel::create(&self.db, student.id, course.user_id, course.id, course.price)
                .await
                .map_err(map_duplicate_purchase)?;

        info!(
            enrollment_id = enrollment.id,
            student_id = student.id,
            course_id = course.id,
            "Course purchased"
        );
        Ok(enrollment)
    }
}

fn map_duplicate_purchase(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict(ALREADY_PURCHASED_MESSAGE.into())
        }
        _ => AppError::Database(err),
    }
}
