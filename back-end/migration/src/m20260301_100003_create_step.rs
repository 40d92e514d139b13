use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No unique constraint on (tutorial_id, order): siblings may share an order.
        manager
            .create_table(
                Table::create()
                    .table(Step::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Step::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Step::Title).string_len(255))
                    .col(ColumnDef::new(Step::Order).integer())
                    .col(ColumnDef::new(Step::Content).json())
                    .col(ColumnDef::new(Step::TutorialId).integer().not_null())
                    .col(
                        ColumnDef::new(Step::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Step::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_step_tutorial")
                            .from(Step::Table, Step::TutorialId)
                            .to(Tutorial::Table, Tutorial::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_step_tutorial_order")
                    .table(Step::Table)
                    .col(Step::TutorialId)
                    .col(Step::Order)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Step::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Step {
    Table,
    Id,
    Title,
    Order,
    Content,
    TutorialId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Tutorial {
    Table,
    Id,
}
