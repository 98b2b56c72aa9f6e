use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

/// A course offered by a teacher, with its hosted thumbnail and video.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "courses")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    /// Owning teacher.
    pub user_id: i64,

    pub course_title: String,
    pub course_description: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,

    /// Hosted thumbnail URL.
    pub course_thumbnail: String,
    /// Hosted URL of the first video.
    #[serde(rename = "material_1")]
    pub material_1: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(has_many = "super::apply_course::Entity")]
    ApplyCourse,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::apply_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApplyCourse.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        user_id: i64,
        course_title: &str,
        course_description: &str,
        price: f64,
        course_thumbnail: &str,
        material_1: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            user_id: Set(user_id),
            course_title: Set(course_title.to_owned()),
            course_description: Set(course_description.to_owned()),
            price: Set(price),
            course_thumbnail: Set(course_thumbnail.to_owned()),
            material_1: Set(material_1.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        course.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Every course, oldest first. Unfiltered and unpaginated.
    pub async fn find_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    /// Number of courses owned by `user_id`.
    pub async fn count_by_owner(db: &DbConn, user_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .count(db)
            .await
    }
}
