use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A graded submission record.
///
/// Rows are written once at submit time and never updated. The submitted
/// answer map is frozen into `submission_history` as JSON text; the exam's
/// quiz membership is deliberately not frozen, so later reviews reflect
/// the exam as it is configured at read time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "exam_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub user_id: i64,
    pub exam_id: i64,

    /// Percentage score rounded to two decimals.
    pub score: f64,
    pub correct: i32,
    pub incorrect: i32,
    /// Client-reported seconds, stored verbatim.
    pub time_taken: i32,
    /// JSON object mapping quiz ids to submitted option indices.
    #[sea_orm(column_type = "Text")]
    pub submission_history: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::exam::Entity",
        from = "Column::ExamId",
        to = "super::exam::Column::Id",
        on_delete = "Cascade"
    )]
    Exam,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DbConn,
        user_id: i64,
        exam_id: i64,
        score: f64,
        correct: i32,
        incorrect: i32,
        time_taken: i32,
        submission_history: &str,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let result = ActiveModel {
            user_id: Set(user_id),
            exam_id: Set(exam_id),
            score: Set(score),
            correct: Set(correct),
            incorrect: Set(incorrect),
            time_taken: Set(time_taken),
            submission_history: Set(submission_history.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        result.insert(db).await
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}
