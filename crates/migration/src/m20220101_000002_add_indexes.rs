use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column) for every natural-key lookup and list ordering.
const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_address_line_1", "address", "address_line_1"),
    ("idx_person_last_name", "person", "last_name"),
    ("idx_contact_email", "contact", "email"),
    ("idx_department_name", "department", "name"),
    ("idx_company_date_created", "company", "date_created"),
    ("idx_contact_person_person", "contact_person", "person_id"),
    ("idx_employee_department", "employee", "department_id"),
    ("idx_numbering_service_provider", "numbering", "service_provider_id"),
    ("idx_numbering_assigned_number", "numbering", "assigned_number"),
    ("idx_postal_company", "postal", "company_id"),
    ("idx_postal_call_sign", "postal", "call_sign"),
    ("idx_spectrum_applicant", "spectrum", "applicant_id"),
    ("idx_telecom_company", "telecom", "company_id"),
    ("idx_typeapproval_applicant", "typeapproval", "applicant_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(*name)
                        .table(Alias::new(*table))
                        .col(Alias::new(*column))
                        .to_owned(),
                )
                .await?;
        }

        // Resource references are looked up by their full path.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_resource_meta_location_name")
                    .table(Alias::new("resource_meta"))
                    .col(Alias::new("location"))
                    .col(Alias::new("name"))
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_resource_meta_location_name").table(Alias::new("resource_meta")).to_owned())
            .await?;
        for (name, table, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).table(Alias::new(*table)).to_owned())
                .await?;
        }
        Ok(())
    }
}
