use std::collections::HashMap;

use chrono::{DateTime, Utc};
use db::models::exam_result::Model as ExamResultModel;
use db::models::quiz::Model as QuizModel;
use serde::Serialize;
use util::answer_set;

/// One review line: a live quiz row paired with what the user submitted
/// for it.
///
/// `correct_answers` is the stored encoding passed through untouched, and
/// `answer` is the submitted set re-serialized the same way, so clients
/// compare the two fields directly.
#[derive(Debug, Serialize)]
pub struct ReviewItem {
    pub id: i64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answers: String,
    pub multiple_choice: bool,
    pub answer: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ResultSummary {
    pub id: i64,
    pub exam_id: i64,
    pub exam_title: Option<String>,
    pub score: f64,
    pub correct: i32,
    pub incorrect: i32,
    pub time_taken: i32,
    pub created_at: DateTime<Utc>,
}

impl ResultSummary {
    pub fn from_model(result: ExamResultModel, exam_title: Option<String>) -> Self {
        Self {
            id: result.id,
            exam_id: result.exam_id,
            exam_title,
            score: result.score,
            correct: result.correct,
            incorrect: result.incorrect,
            time_taken: result.time_taken,
            created_at: result.created_at,
        }
    }
}

/// A result together with its per-question review.
///
/// Reviews are rebuilt from the exam's quiz membership at the time the
/// detail is assembled. For a fresh submission that is the same set that
/// was graded; for an old result it is whatever the exam looks like now,
/// so edited exams change the `items` of past reviews while the stored
/// counts and score stay frozen.
#[derive(Debug, Serialize, Default)]
pub struct ResultDetail {
    pub id: i64,
    pub exam_id: i64,
    pub exam_title: Option<String>,
    pub score: f64,
    pub correct: i32,
    pub incorrect: i32,
    pub time_taken: i32,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ReviewItem>,
}

impl ResultDetail {
    pub fn from_parts(result: ExamResultModel, exam_title: String, items: Vec<ReviewItem>) -> Self {
        Self {
            id: result.id,
            exam_id: result.exam_id,
            exam_title: Some(exam_title),
            score: result.score,
            correct: result.correct,
            incorrect: result.incorrect,
            time_taken: result.time_taken,
            created_at: result.created_at,
            items,
        }
    }
}

/// Pairs each quiz with the submitted selection from `history`. Quizzes
/// the user never answered get an empty encoded selection.
pub fn build_review(quizzes: &[QuizModel], history: &HashMap<i64, Vec<i64>>) -> Vec<ReviewItem> {
    quizzes
        .iter()
        .map(|quiz| {
            let submitted = history.get(&quiz.id).cloned().unwrap_or_default();
            ReviewItem {
                id: quiz.id,
                question: quiz.question.clone(),
                options: quiz.decoded_options(),
                correct_answers: quiz.correct_answers.clone(),
                multiple_choice: quiz.multiple_choice,
                answer: answer_set::encode_indices(&submitted),
            }
        })
        .collect()
}
