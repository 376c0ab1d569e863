use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

/// Join table linking exams to their member quizzes.
///
/// Membership is by reference, so editing or re-pointing a row changes
/// what every later review of that exam sees.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_quizzes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub exam_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub quiz_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam::Entity",
        from = "Column::ExamId",
        to = "super::exam::Column::Id",
        on_delete = "Cascade"
    )]
    Exam,

    #[sea_orm(
        belongs_to = "super::quiz::Entity",
        from = "Column::QuizId",
        to = "super::quiz::Column::Id",
        on_delete = "Cascade"
    )]
    Quiz,
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn link(db: &DbConn, exam_id: i64, quiz_id: i64) -> Result<Model, DbErr> {
        let row = ActiveModel {
            exam_id: Set(exam_id),
            quiz_id: Set(quiz_id),
        };

        row.insert(db).await
    }
}
