use crate::seed::Seeder;
use db::models::{quiz, subject};
use rand::rngs::{OsRng, StdRng};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

pub struct QuizSeeder;

#[async_trait::async_trait]
impl Seeder for QuizSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        // Use a Send-compatible RNG
        let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

        let subjects = subject::Entity::find().all(db).await?;
        if subjects.is_empty() {
            panic!("No subjects found; run SubjectSeeder first");
        }

        let stems = [
            "Which of the following statements is true",
            "Select the correct definition",
            "Which option best completes the sentence",
            "Identify the valid example",
            "Which of these does not belong",
        ];

        for subject in &subjects {
            for i in 0..8 {
                let question = format!(
                    "{} about {}? ({})",
                    stems.choose(&mut rng).unwrap(),
                    subject.name,
                    i + 1
                );
                let options: Vec<String> =
                    (b'A'..=b'D').map(|c| format!("Option {}", c as char)).collect();

                let multiple_choice = rng.gen_bool(0.3);
                let correct: Vec<i64> = if multiple_choice {
                    let mut picks: Vec<i64> = (0..4).collect();
                    picks.shuffle(&mut rng);
                    picks.truncate(2);
                    picks
                } else {
                    vec![rng.gen_range(0..4i64)]
                };

                quiz::Model::create(db, subject.id, &question, &options, &correct, multiple_choice)
                    .await?;
            }
        }

        Ok(())
    }
}
