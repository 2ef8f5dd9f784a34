//! Create `unique_id` table: allocated type-approval identifiers.
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
                    .table(UniqueId::Table)
                    .if_not_exists()
                    .col(pk_auto(UniqueId::Id))
                    .col(string_len(UniqueId::Value, 255).unique_key())
                    .col(string_len_null(UniqueId::Occupant, 255))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UniqueId::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UniqueId { Table, Id, Value, Occupant }
