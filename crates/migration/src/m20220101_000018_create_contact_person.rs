//! Create `contact_person` table linking a person to a contact card.
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
                    .table(ContactPerson::Table)
                    .if_not_exists()
                    .col(pk_auto(ContactPerson::Id))
                    .col(integer(ContactPerson::PersonId))
                    .col(integer(ContactPerson::ContactId))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_person_person")
                            .from(ContactPerson::Table, ContactPerson::PersonId)
                            .to(Person::Table, Person::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_person_contact")
                            .from(ContactPerson::Table, ContactPerson::ContactId)
                            .to(Contact::Table, Contact::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ContactPerson::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ContactPerson { Table, Id, PersonId, ContactId }

#[derive(DeriveIden)]
enum Person { Table, Id }

#[derive(DeriveIden)]
enum Contact { Table, Id }
