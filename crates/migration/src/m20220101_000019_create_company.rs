//! Create `company` table with FKs to `address` and `contact_person`.
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
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(string_len(Company::Name, 255).unique_key())
                    .col(integer_null(Company::AddressId))
                    .col(integer_null(Company::LegalPersonId))
                    .col(integer_null(Company::TechPersonId))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_address")
                            .from(Company::Table, Company::AddressId)
                            .to(Address::Table, Address::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_legal_person")
                            .from(Company::Table, Company::LegalPersonId)
                            .to(ContactPerson::Table, ContactPerson::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_company_tech_person")
                            .from(Company::Table, Company::TechPersonId)
                            .to(ContactPerson::Table, ContactPerson::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company { Table, Id, Name, AddressId, LegalPersonId, TechPersonId }

#[derive(DeriveIden)]
enum Address { Table, Id }

#[derive(DeriveIden)]
enum ContactPerson { Table, Id }
