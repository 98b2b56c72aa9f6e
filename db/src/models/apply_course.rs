use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use super::course;

/// An enrollment: a student's purchase of a teacher's course.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "apply_courses")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub student_id: i64,
    pub teacher_id: i64,
    pub course_id: i64,

    /// Price paid, copied from the course at purchase time.
    #[sea_orm(column_type = "Double")]
    pub price: f64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TeacherId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Teacher,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        student_id: i64,
        teacher_id: i64,
        course_id: i64,
        price: f64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let enrollment = ActiveModel {
            student_id: Set(student_id),
            teacher_id: Set(teacher_id),
            course_id: Set(course_id),
            price: Set(price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        enrollment.insert(db).await
    }

    /// Number of enrollments in courses taught by `teacher_id`.
    pub async fn count_by_teacher(db: &DbConn, teacher_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .count(db)
            .await
    }

    pub async fn exists_for(db: &DbConn, student_id: i64, course_id: i64) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .count(db)
            .await?;
        Ok(count > 0)
    }

    /// A student's enrollments in retrieval order, each joined with its course.
    ///
    /// The course side is `None` when the referenced course row is gone.
    pub async fn find_with_course_by_student(
        db: &DbConn,
        student_id: i64,
    ) -> Result<Vec<(Model, Option<course::Model>)>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_asc(Column::Id)
            .find_also_related(course::Entity)
            .all(db)
            .await
    }
}
