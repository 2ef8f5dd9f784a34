//! Create `department` table.
use sea_orm_migration::{prelude::*, schema::*};

use crate::audit;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(pk_auto(Department::Id))
                    .col(string_len(Department::Name, 255))
                    .col(string_len_null(Department::Description, 255))
                    .col(integer_null(Department::Size))
                    .col(string_len_null(Department::Permissions, 255))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Department::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Department { Table, Id, Name, Description, Size, Permissions }
