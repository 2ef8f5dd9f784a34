//! Create `resource_meta` table.
//! Stores references to uploaded documents (inspection reports, certificates).
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
                    .table(ResourceMeta::Table)
                    .if_not_exists()
                    .col(pk_auto(ResourceMeta::Id))
                    .col(string_len(ResourceMeta::Name, 255))
                    .col(string_len(ResourceMeta::Location, 512))
                    .col(integer(ResourceMeta::Version))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ResourceMeta::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ResourceMeta { Table, Id, Name, Location, Version }
