use crate::seed::Seeder;
use db::models::subject::Model;
use sea_orm::{DatabaseConnection, DbErr};

pub struct SubjectSeeder;

const SUBJECTS: &[(&str, &str)] = &[
    ("Mathematics", "Algebra, calculus and discrete structures"),
    ("Physics", "Mechanics, waves and electromagnetism"),
    ("Computer Science", "Programming, data structures and algorithms"),
    ("Chemistry", "Atomic structure and chemical reactions"),
    ("Biology", "Cells, genetics and ecosystems"),
    ("History", "From antiquity to the modern era"),
];

#[async_trait::async_trait]
impl Seeder for SubjectSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for (name, description) in SUBJECTS {
            Model::create(db, name, Some(description)).await?;
        }

        Ok(())
    }
}
