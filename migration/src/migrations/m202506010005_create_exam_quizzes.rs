use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202506010005_create_exam_quizzes"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("exam_quizzes"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("exam_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("quiz_id")).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("exam_id"))
                            .col(Alias::new("quiz_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("exam_quizzes"), Alias::new("exam_id"))
                            .to(Alias::new("exams"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("exam_quizzes"), Alias::new("quiz_id"))
                            .to(Alias::new("quizzes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("exam_quizzes")).to_owned())
            .await
    }
}
