//! Create `postal` table: postal operator licensing inspections.
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
                    .table(Postal::Table)
                    .if_not_exists()
                    .col(pk_auto(Postal::Id))
                    .col(string_len(Postal::CallSign, 255))
                    .col(string_len_null(Postal::PhysicalLocationRequirements, 255))
                    .col(integer_null(Postal::LicenseValidity))
                    .col(integer_null(Postal::PostalArticleConfidentiality))
                    .col(boolean(Postal::TrainingRequirements).default(false))
                    .col(boolean(Postal::QosReqsWorkingDays).default(false))
                    .col(boolean(Postal::QosReqsClaimsPolicy).default(false))
                    .col(boolean(Postal::QosReqsCtrlProhibitItems).default(false))
                    .col(boolean(Postal::QosReqsComplaintsRegister).default(false))
                    .col(string_len_null(Postal::Notes01, 255))
                    .col(string_len_null(Postal::Notes02, 255))
                    .col(string_len_null(Postal::Recommendations, 255))
                    .col(integer_null(Postal::CompanyId))
                    .col(integer_null(Postal::ReportId))
                    .col(integer_null(Postal::InspectedById))
                    .col(integer_null(Postal::ReviewedById))
                    .col(integer_null(Postal::ApprovedById))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(&mut optional_ref("fk_postal_company", Postal::Table, Postal::CompanyId, Company::Table, Company::Id))
                    .foreign_key(&mut optional_ref("fk_postal_report", Postal::Table, Postal::ReportId, ResourceMeta::Table, ResourceMeta::Id))
                    .foreign_key(&mut optional_ref("fk_postal_inspected_by", Postal::Table, Postal::InspectedById, Employee::Table, Employee::Id))
                    .foreign_key(&mut optional_ref("fk_postal_reviewed_by", Postal::Table, Postal::ReviewedById, Employee::Table, Employee::Id))
                    .foreign_key(&mut optional_ref("fk_postal_approved_by", Postal::Table, Postal::ApprovedById, Employee::Table, Employee::Id))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Postal::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Postal {
    Table,
    Id,
    CallSign,
    PhysicalLocationRequirements,
    LicenseValidity,
    PostalArticleConfidentiality,
    TrainingRequirements,
    QosReqsWorkingDays,
    QosReqsClaimsPolicy,
    QosReqsCtrlProhibitItems,
    QosReqsComplaintsRegister,
    #[sea_orm(iden = "notes_01")]
    Notes01,
    #[sea_orm(iden = "notes_02")]
    Notes02,
    Recommendations,
    CompanyId,
    ReportId,
    InspectedById,
    ReviewedById,
    ApprovedById,
}

#[derive(DeriveIden)]
enum Company { Table, Id }

#[derive(DeriveIden)]
enum ResourceMeta { Table, Id }

#[derive(DeriveIden)]
enum Employee { Table, Id }
