//! Create `contact` table.
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
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(pk_auto(Contact::Id))
                    .col(string_len_null(Contact::TelOne, 255))
                    .col(string_len_null(Contact::TelTwo, 255))
                    .col(string_len_null(Contact::Email, 255))
                    .col(string_len_null(Contact::SocialMediaHandle, 255))
                    .col(string_len_null(Contact::Website, 255))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact { Table, Id, TelOne, TelTwo, Email, SocialMediaHandle, Website }
