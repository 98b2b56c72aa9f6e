use crate::seed::Seeder;
use db::models::{
    course::Model as CourseModel,
    user::{Column as UserColumn, Entity as UserEntity, Role},
};
use fake::{
    Fake,
    faker::lorem::en::{Paragraph, Sentence},
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct CourseSeeder;

#[async_trait::async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let teachers = UserEntity::find()
            .filter(UserColumn::Role.eq(Role::Teacher))
            .all(db)
            .await?;

        for teacher in teachers {
            for _ in 0..fastrand::usize(1..=3) {
                let title: String = Sentence(2..5).fake();
                let description: String = Paragraph(2..4).fake();
                let price = fastrand::u32(0..200) as f64 + 0.99;
                let n = fastrand::u32(1..1000);

                CourseModel::create(
                    db,
                    teacher.id,
                    title.trim_end_matches('.'),
                    &description,
                    price,
                    &format!("https://picsum.photos/seed/{n}/640/360"),
                    &format!("https://media.example.com/video/upload/sample-{n}.mp4"),
                )
                .await?;
            }
        }

        Ok(())
    }
}
