//! Create `numbering` table: number-range assignments to service providers.
use sea_orm_migration::{prelude::*, schema::*};

use crate::audit::{self, optional_ref};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Numbering::Table)
                    .if_not_exists()
                    .col(pk_auto(Numbering::Id))
                    .col(string_len(Numbering::ServiceCategory, 255))
                    .col(string_len_null(Numbering::NumberType, 255))
                    .col(string_len_null(Numbering::ApplicableServiceType, 255))
                    .col(string_len_null(Numbering::Description, 255))
                    .col(integer_null(Numbering::AssignedRange))
                    .col(integer_null(Numbering::AssignedNumber))
                    .col(timestamp_with_time_zone_null(Numbering::AssignmentDate))
                    .col(timestamp_with_time_zone_null(Numbering::LastAuthRenewalDate))
                    .col(boolean(Numbering::IsCompliant).default(true))
                    .col(string_len_null(Numbering::Notes, 255))
                    .col(string_len_null(Numbering::Recommendations, 255))
                    .col(integer_null(Numbering::ServiceProviderId))
                    .col(integer_null(Numbering::ReportId))
                    .col(integer_null(Numbering::AssignedById))
                    .col(integer_null(Numbering::LastUpdatedById))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(&mut optional_ref("fk_numbering_service_provider", Numbering::Table, Numbering::ServiceProviderId, Company::Table, Company::Id))
                    .foreign_key(&mut optional_ref("fk_numbering_report", Numbering::Table, Numbering::ReportId, ResourceMeta::Table, ResourceMeta::Id))
                    .foreign_key(&mut optional_ref("fk_numbering_assigned_by", Numbering::Table, Numbering::AssignedById, Employee::Table, Employee::Id))
                    .foreign_key(&mut optional_ref("fk_numbering_last_updated_by", Numbering::Table, Numbering::LastUpdatedById, Employee::Table, Employee::Id))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Numbering::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Numbering {
    Table,
    Id,
    ServiceCategory,
    NumberType,
    ApplicableServiceType,
    Description,
    AssignedRange,
    AssignedNumber,
    AssignmentDate,
    LastAuthRenewalDate,
    IsCompliant,
    Notes,
    Recommendations,
    ServiceProviderId,
    ReportId,
    AssignedById,
    LastUpdatedById,
}

#[derive(DeriveIden)]
enum Company { Table, Id }

#[derive(DeriveIden)]
enum ResourceMeta { Table, Id }

#[derive(DeriveIden)]
enum Employee { Table, Id }
