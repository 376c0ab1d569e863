use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Allowed exam lengths. Stored as a string enum in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "exam_duration")]
pub enum ExamDuration {
    #[sea_orm(string_value = "min_10")]
    Min10,
    #[sea_orm(string_value = "min_15")]
    Min15,
    #[sea_orm(string_value = "min_30")]
    Min30,
    #[sea_orm(string_value = "min_45")]
    Min45,
    #[sea_orm(string_value = "min_60")]
    Min60,
    #[sea_orm(string_value = "min_90")]
    Min90,
    #[sea_orm(string_value = "min_120")]
    Min120,
}

impl ExamDuration {
    pub fn minutes(&self) -> u32 {
        match self {
            ExamDuration::Min10 => 10,
            ExamDuration::Min15 => 15,
            ExamDuration::Min30 => 30,
            ExamDuration::Min45 => 45,
            ExamDuration::Min60 => 60,
            ExamDuration::Min90 => 90,
            ExamDuration::Min120 => 120,
        }
    }

    /// Maps a minute count onto the closed set of allowed durations.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            10 => Some(ExamDuration::Min10),
            15 => Some(ExamDuration::Min15),
            30 => Some(ExamDuration::Min30),
            45 => Some(ExamDuration::Min45),
            60 => Some(ExamDuration::Min60),
            90 => Some(ExamDuration::Min90),
            120 => Some(ExamDuration::Min120),
            _ => None,
        }
    }
}

/// An exam referencing its member quizzes through `exam_quizzes`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub duration: ExamDuration,
    pub subject_id: i64,

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

    #[sea_orm(has_many = "super::exam_result::Entity")]
    ExamResults,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        super::exam_quiz::Relation::Quiz.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::exam_quiz::Relation::Exam.def().rev())
    }
}

impl Related<super::exam_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        title: &str,
        duration: ExamDuration,
        subject_id: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let exam = ActiveModel {
            title: Set(title.to_owned()),
            duration: Set(duration),
            subject_id: Set(subject_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        exam.insert(db).await
    }

    /// Fetches this exam's current member quizzes, ordered by quiz id so
    /// grading and review walk the set deterministically.
    pub async fn quizzes(&self, db: &DbConn) -> Result<Vec<super::quiz::Model>, DbErr> {
        self.find_related(super::quiz::Entity)
            .order_by_asc(super::quiz::Column::Id)
            .all(db)
            .await
    }

    /// Replaces this exam's membership with the given quiz ids.
    pub async fn replace_quizzes(&self, db: &DbConn, quiz_ids: &[i64]) -> Result<(), DbErr> {
        super::exam_quiz::Entity::delete_many()
            .filter(super::exam_quiz::Column::ExamId.eq(self.id))
            .exec(db)
            .await?;

        for quiz_id in quiz_ids {
            super::exam_quiz::Model::link(db, self.id, *quiz_id).await?;
        }

        Ok(())
    }
}
