use crate::seed::Seeder;
use db::grading;
use db::models::{exam, exam_result, user};
use rand::rngs::{OsRng, StdRng};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use std::collections::HashMap;
use util::answer_set;

pub struct ExamResultSeeder;

#[async_trait::async_trait]
impl Seeder for ExamResultSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

        let users = user::Entity::find()
            .filter(user::Column::Admin.eq(false))
            .all(db)
            .await?;
        let exams = exam::Entity::find().all(db).await?;
        if users.is_empty() || exams.is_empty() {
            panic!("No users or exams found; run the earlier seeders first");
        }

        for exam in &exams {
            let quizzes = exam.quizzes(db).await?;

            for user in users.choose_multiple(&mut rng, 3) {
                let mut answers: HashMap<i64, Vec<i64>> = HashMap::new();
                for quiz in &quizzes {
                    // Roughly two thirds of submitted answers are correct
                    if rng.gen_bool(0.66) {
                        answers.insert(quiz.id, quiz.decoded_correct_answers());
                    } else {
                        answers.insert(quiz.id, vec![rng.gen_range(0..4i64)]);
                    }
                }

                let grading = grading::grade(&quizzes, &answers);
                let time_taken = rng.gen_range(60..=exam.duration.minutes() as i32 * 60);
                exam_result::Model::create(
                    db,
                    user.id,
                    exam.id,
                    grading.score,
                    grading.correct,
                    grading.incorrect,
                    time_taken,
                    &answer_set::encode_history(&answers),
                )
                .await?;
            }
        }

        Ok(())
    }
}
