use crate::seed::Seeder;
use db::models::user::{Model, Role};
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use sea_orm::{DatabaseConnection, DbErr};
use services::user_service::hash_password;

pub const SEED_PASSWORD: &str = "password123";

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let hash = hash_password(SEED_PASSWORD).map_err(|e| DbErr::Custom(e.to_string()))?;

        // Fixed accounts, kept across re-runs
        for (name, email, role) in [
            ("Demo Teacher", "teacher@example.com", Role::Teacher),
            ("Demo Student", "student@example.com", Role::Student),
        ] {
            if Model::find_by_email(db, email).await?.is_none() {
                Model::create(db, name, email, &hash, role, None).await?;
            }
        }

        // Random accounts; the odd duplicate e-mail is simply skipped
        for i in 0..12 {
            let role = if i % 4 == 0 { Role::Teacher } else { Role::Student };
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let _ = Model::create(db, &name, &email.to_lowercase(), &hash, role, None).await;
        }

        Ok(())
    }
}
