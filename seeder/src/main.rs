use crate::seed::run_seeder;
use crate::seed::Seeder;
use crate::seeds::{
    exam::ExamSeeder, exam_result::ExamResultSeeder, quiz::QuizSeeder, subject::SubjectSeeder,
    user::UserSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let db = db::connect().await;

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(SubjectSeeder), "Subject"),
        (Box::new(QuizSeeder), "Quiz"),
        (Box::new(ExamSeeder), "Exam"),
        (Box::new(ExamResultSeeder), "ExamResult"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
