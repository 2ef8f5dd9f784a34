//! Create `telecom` table: telecom operator compliance reviews.
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
                    .table(Telecom::Table)
                    .if_not_exists()
                    .col(pk_auto(Telecom::Id))
                    .col(string_len(Telecom::ServiceDetails, 255))
                    .col(string_len_null(Telecom::ServiceTechnology, 255))
                    .col(string_len_null(Telecom::QosReqsClaimsStatus, 255))
                    .col(string_len_null(Telecom::CoverageAreaDetails, 255))
                    .col(string_len_null(Telecom::SharingRequirements, 255))
                    .col(string_len_null(Telecom::ProtectionStatus, 255))
                    .col(string_len_null(Telecom::EssentialResourceAuthStatus, 255))
                    .col(string_len_null(Telecom::OutageStatus, 255))
                    .col(string_len_null(Telecom::EmergencyServiceRequirements, 255))
                    .col(string_len_null(Telecom::GeneralProvisions, 255))
                    .col(string_len_null(Telecom::Notes, 255))
                    .col(string_len_null(Telecom::Recommendations, 255))
                    .col(integer_null(Telecom::CompanyId))
                    .col(integer_null(Telecom::OutageReportId))
                    .col(integer_null(Telecom::ReportId))
                    .col(integer_null(Telecom::ReviewedById))
                    .col(integer_null(Telecom::ApprovedById))
                    .col(integer_null(Telecom::InspectedById))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(&mut optional_ref("fk_telecom_company", Telecom::Table, Telecom::CompanyId, Company::Table, Company::Id))
                    .foreign_key(&mut optional_ref("fk_telecom_outage_report", Telecom::Table, Telecom::OutageReportId, ResourceMeta::Table, ResourceMeta::Id))
                    .foreign_key(&mut optional_ref("fk_telecom_report", Telecom::Table, Telecom::ReportId, ResourceMeta::Table, ResourceMeta::Id))
                    .foreign_key(&mut optional_ref("fk_telecom_reviewed_by", Telecom::Table, Telecom::ReviewedById, Employee::Table, Employee::Id))
                    .foreign_key(&mut optional_ref("fk_telecom_approved_by", Telecom::Table, Telecom::ApprovedById, Employee::Table, Employee::Id))
                    .foreign_key(&mut optional_ref("fk_telecom_inspected_by", Telecom::Table, Telecom::InspectedById, Employee::Table, Employee::Id))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Telecom::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Telecom {
    Table,
    Id,
    ServiceDetails,
    ServiceTechnology,
    QosReqsClaimsStatus,
    CoverageAreaDetails,
    SharingRequirements,
    ProtectionStatus,
    EssentialResourceAuthStatus,
    OutageStatus,
    EmergencyServiceRequirements,
    GeneralProvisions,
    Notes,
    Recommendations,
    CompanyId,
    OutageReportId,
    ReportId,
    ReviewedById,
    ApprovedById,
    InspectedById,
}

#[derive(DeriveIden)]
enum Company { Table, Id }

#[derive(DeriveIden)]
enum ResourceMeta { Table, Id }

#[derive(DeriveIden)]
enum Employee { Table, Id }
