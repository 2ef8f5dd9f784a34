//! Create `person` table.
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
                    .table(Person::Table)
                    .if_not_exists()
                    .col(pk_auto(Person::Id))
                    .col(string_len_null(Person::FirstName, 255))
                    .col(string_len(Person::LastName, 255))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Person::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Person { Table, Id, FirstName, LastName }
