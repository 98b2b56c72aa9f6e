use crate::seed::Seeder;
use db::models::{
    apply_course::Model as ApplyCourseModel,
    course::Model as CourseModel,
    user::{Column as UserColumn, Entity as UserEntity, Role},
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct ApplyCourseSeeder;

#[async_trait::async_trait]
impl Seeder for ApplyCourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let students = UserEntity::find()
            .filter(UserColumn::Role.eq(Role::Student))
            .all(db)
            .await?;
        let courses = CourseModel::find_all(db).await?;
        if courses.is_empty() {
            return Ok(());
        }

        for student in students {
            for _ in 0..fastrand::usize(0..=3) {
                let course = &courses[fastrand::usize(..courses.len())];
                if ApplyCourseModel::exists_for(db, student.id, course.id).await? {
                    continue;
                }
                ApplyCourseModel::create(db, student.id, course.user_id, course.id, course.price)
                    .await?;
            }
        }

        Ok(())
    }
}
