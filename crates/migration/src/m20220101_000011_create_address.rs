//! Create `address` table.
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
                    .table(Address::Table)
                    .if_not_exists()
                    .col(pk_auto(Address::Id))
                    .col(string_len_null(Address::District, 255))
                    .col(string_len_null(Address::PostalCode, 255))
                    .col(string_len_null(Address::Country, 255))
                    .col(string_len(Address::AddressLine1, 255))
                    .col(string_len_null(Address::AddressLine2, 255))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Address {
    Table,
    Id,
    District,
    PostalCode,
    Country,
    #[sea_orm(iden = "address_line_1")]
    AddressLine1,
    #[sea_orm(iden = "address_line_2")]
    AddressLine2,
}
