use db::models::quiz::Model as QuizModel;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    #[validate(range(min = 1, message = "subject_id must be a positive id"))]
    pub subject_id: i64,

    #[validate(length(min = 1, message = "Question text is required"))]
    pub question: String,

    #[validate(length(min = 1, message = "At least one option is required"))]
    pub options: Vec<String>,

    pub correct_answers: Vec<i64>,

    #[serde(default)]
    pub multiple_choice: bool,
}

impl QuizRequest {
    /// Returns the first correct-answer index that does not address an
    /// existing option, if any. Stored rows are trusted by grading, so this
    /// boundary is the only place the invariant is enforced.
    pub fn invalid_index(&self) -> Option<i64> {
        self.correct_answers
            .iter()
            .copied()
            .find(|&i| i < 0 || i as usize >= self.options.len())
    }
}

#[derive(Debug, Serialize, Default)]
pub struct QuizResponse {
    pub id: i64,
    pub subject_id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: Vec<i64>,
    pub multiple_choice: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<QuizModel> for QuizResponse {
    fn from(quiz: QuizModel) -> Self {
        Self {
            id: quiz.id,
            subject_id: quiz.subject_id,
            options: quiz.decoded_options(),
            correct_answers: quiz.decoded_correct_answers(),
            multiple_choice: quiz.multiple_choice,
            created_at: quiz.created_at.to_rfc3339(),
            updated_at: quiz.updated_at.to_rfc3339(),
            question: quiz.question,
        }
    }
}
