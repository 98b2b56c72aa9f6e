use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name.
    pub name: String,
    /// User's unique email address.
    pub email: String,
    /// Securely hashed password string.
    pub password_hash: String,
    /// Marketplace role of the account.
    pub role: Role,
    /// Hosted URL of the CV image uploaded at sign-up, if any.
    pub cv_image: Option<String>,
    /// Timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The two account roles of the marketplace.
///
/// Stored as its display string (`Teacher` / `Student`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[strum(ascii_case_insensitive)]
pub enum Role {
    #[sea_orm(string_value = "Teacher")]
    Teacher,

    #[sea_orm(string_value = "Student")]
    Student,
}

/// Actions gated by the caller's stored role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    UploadCourse,
    BuyCourse,
}

impl Role {
    /// The single place where roles are mapped to the actions they allow.
    pub fn permits(self, permission: Permission) -> bool {
        matches!(
            (self, permission),
            (Role::Teacher, Permission::UploadCourse) | (Role::Student, Permission::BuyCourse)
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course::Entity")]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Inserts a new user. The caller is responsible for hashing the password.
    pub async fn create(
        db: &DbConn,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
        cv_image: Option<String>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let user = ActiveModel {
            name: Set(name.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash.to_owned()),
            role: Set(role),
            cv_image: Set(cv_image),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        user.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Looks a user up by e-mail, ignoring surrounding whitespace and case.
    pub async fn find_by_email(db: &DbConn, email: &str) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(db)
            .await
    }
}
