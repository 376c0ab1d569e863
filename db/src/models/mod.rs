pub mod exam;
pub mod exam_quiz;
pub mod exam_result;
pub mod quiz;
pub mod subject;
pub mod user;

pub use exam::Entity as Exam;
pub use exam_quiz::Entity as ExamQuiz;
pub use exam_result::Entity as ExamResult;
pub use quiz::Entity as Quiz;
pub use subject::Entity as Subject;
pub use user::Entity as User;
