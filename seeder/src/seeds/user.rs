use crate::seed::Seeder;
use db::models::user::Model;
use fake::{faker::internet::en::SafeEmail, Fake};
use sea_orm::{DatabaseConnection, DbErr};

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Fixed admin user
        Model::create(db, "admin", "admin@example.com", "password123", true).await?;

        // Fixed normal user
        Model::create(db, "student", "student@example.com", "password123", false).await?;

        // Random users. The faker can repeat emails, so collisions with the
        // unique index are skipped rather than aborting the run.
        for _ in 0..10 {
            let username = format!("user{:05}", fastrand::u32(..100_000));
            let email: String = SafeEmail().fake();
            let _ = Model::create(db, &username, &email, "password123", false).await;
        }

        Ok(())
    }
}
