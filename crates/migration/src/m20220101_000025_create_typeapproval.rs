//! Create `typeapproval` table: equipment type-approval decisions.
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
                    .table(Typeapproval::Table)
                    .if_not_exists()
                    .col(pk_auto(Typeapproval::Id))
                    .col(string_len_null(Typeapproval::EquipmentCategory, 255))
                    .col(boolean(Typeapproval::StatusApproved).default(false))
                    .col(string_len(Typeapproval::EquipmentName, 255))
                    .col(string_len_null(Typeapproval::EquipmentModel, 255))
                    .col(string_len_null(Typeapproval::EquipmentDesc, 255))
                    .col(string_len_null(Typeapproval::ApplicableStandards, 255))
                    .col(timestamp_with_time_zone_null(Typeapproval::ApprovalRejectionDate))
                    .col(string_len_null(Typeapproval::TaUniqueId, 255))
                    .col(integer_null(Typeapproval::TaCertificateId))
                    .col(integer_null(Typeapproval::ReportId))
                    .col(integer_null(Typeapproval::AssessedById))
                    .col(integer_null(Typeapproval::ApplicantId))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(&mut optional_ref("fk_typeapproval_certificate", Typeapproval::Table, Typeapproval::TaCertificateId, ResourceMeta::Table, ResourceMeta::Id))
                    .foreign_key(&mut optional_ref("fk_typeapproval_report", Typeapproval::Table, Typeapproval::ReportId, ResourceMeta::Table, ResourceMeta::Id))
                    .foreign_key(&mut optional_ref("fk_typeapproval_assessed_by", Typeapproval::Table, Typeapproval::AssessedById, Employee::Table, Employee::Id))
                    .foreign_key(&mut optional_ref("fk_typeapproval_applicant", Typeapproval::Table, Typeapproval::ApplicantId, Company::Table, Company::Id))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Typeapproval::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Typeapproval {
    Table,
    Id,
    EquipmentCategory,
    StatusApproved,
    EquipmentName,
    EquipmentModel,
    EquipmentDesc,
    ApplicableStandards,
    ApprovalRejectionDate,
    TaUniqueId,
    TaCertificateId,
    ReportId,
    AssessedById,
    ApplicantId,
}

#[derive(DeriveIden)]
enum Company { Table, Id }

#[derive(DeriveIden)]
enum ResourceMeta { Table, Id }

#[derive(DeriveIden)]
enum Employee { Table, Id }
