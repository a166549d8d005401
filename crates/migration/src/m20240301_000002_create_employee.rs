//! Create `employees` table with a nullable FK to `teams`.
//!
//! Removing a team detaches its members instead of deleting them.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(pk_auto(Employees::Id))
                    .col(string_len(Employees::Name, 128).not_null())
                    .col(integer(Employees::Age).not_null())
                    .col(string_len(Employees::Position, 64).not_null())
                    .col(integer_null(Employees::TeamId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_team")
                            .from(Employees::Table, Employees::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employees::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employees { Table, Id, Name, Age, Position, TeamId }

#[derive(DeriveIden)]
enum Teams { Table, Id }
