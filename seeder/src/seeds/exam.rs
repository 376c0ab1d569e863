use crate::seed::Seeder;
use db::models::exam::{ExamDuration, Model as ExamModel};
use db::models::{quiz, subject};
use rand::rngs::{OsRng, StdRng};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

pub struct ExamSeeder;

#[async_trait::async_trait]
impl Seeder for ExamSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

        let subjects = subject::Entity::find().all(db).await?;
        if subjects.is_empty() {
            panic!("No subjects found; run SubjectSeeder first");
        }

        let durations = [
            ExamDuration::Min10,
            ExamDuration::Min15,
            ExamDuration::Min30,
            ExamDuration::Min45,
            ExamDuration::Min60,
            ExamDuration::Min90,
            ExamDuration::Min120,
        ];

        for subject in &subjects {
            let quiz_ids: Vec<i64> = quiz::Entity::find()
                .filter(quiz::Column::SubjectId.eq(subject.id))
                .all(db)
                .await?
                .into_iter()
                .map(|q| q.id)
                .collect();
            if quiz_ids.is_empty() {
                continue;
            }

            for n in 1..=2 {
                let exam = ExamModel::create(
                    db,
                    &format!("{} Exam {}", subject.name, n),
                    *durations.choose(&mut rng).unwrap(),
                    subject.id,
                )
                .await?;

                let mut picked = quiz_ids.clone();
                picked.shuffle(&mut rng);
                let take = rng.gen_range(3..=5).min(picked.len());
                picked.truncate(take);
                exam.replace_quizzes(db, &picked).await?;
            }
        }

        Ok(())
    }
}
