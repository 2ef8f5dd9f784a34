//! Create `employee` table. One employee record per contact person.
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
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(integer(Employee::ContactPersonId).unique_key())
                    .col(integer_null(Employee::DepartmentId))
                    .col(string_len_null(Employee::Role, 255))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_contact_person")
                            .from(Employee::Table, Employee::ContactPersonId)
                            .to(ContactPerson::Table, ContactPerson::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_department")
                            .from(Employee::Table, Employee::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee { Table, Id, ContactPersonId, DepartmentId, Role }

#[derive(DeriveIden)]
enum ContactPerson { Table, Id }

#[derive(DeriveIden)]
enum Department { Table, Id }
