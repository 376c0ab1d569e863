use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use util::answer_set;

/// A single multiple-choice question.
///
/// `options` and `correct_answers` are stored as JSON text and decoded
/// through the tolerant codec in `util::answer_set`. A quiz is shared by
/// reference: many exams may include the same row via `exam_quizzes`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub subject_id: i64,

    #[sea_orm(column_type = "Text")]
    pub question: String,
    /// JSON array of option texts.
    #[sea_orm(column_type = "Text")]
    pub options: String,
    /// JSON array of correct option indices.
    #[sea_orm(column_type = "Text")]
    pub correct_answers: String,
    /// Display hint for clients; grading ignores it.
    pub multiple_choice: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id",
        on_delete = "Cascade"
    )]
    Subject,

    #[sea_orm(has_many = "super::exam_quiz::Entity")]
    ExamQuizzes,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        super::exam_quiz::Relation::Exam.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::exam_quiz::Relation::Quiz.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        subject_id: i64,
        question: &str,
        options: &[String],
        correct_answers: &[i64],
        multiple_choice: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let quiz = ActiveModel {
            subject_id: Set(subject_id),
            question: Set(question.to_owned()),
            options: Set(answer_set::encode_options(options)),
            correct_answers: Set(answer_set::encode_indices(correct_answers)),
            multiple_choice: Set(multiple_choice),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        quiz.insert(db).await
    }

    /// Decoded option texts. Malformed stored text yields an empty list.
    pub fn decoded_options(&self) -> Vec<String> {
        answer_set::decode_options(&self.options)
    }

    /// Decoded correct-answer indices. Malformed stored text yields an
    /// empty list.
    pub fn decoded_correct_answers(&self) -> Vec<i64> {
        answer_set::decode_indices(&self.correct_answers)
    }
}
