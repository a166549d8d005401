use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Members lookup: employees by team_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_team_id")
                    .table(Employees::Table)
                    .col(Employees::TeamId)
                    .to_owned(),
            )
            .await?;

        // Sorted listing on name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employees_name")
                    .table(Employees::Table)
                    .col(Employees::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employees_name").table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employees_team_id").table(Employees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employees { Table, TeamId, Name }
