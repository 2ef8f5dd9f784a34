//! Create `spectrum` table: frequency assignments and studio-transmitter links.
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
                    .table(Spectrum::Table)
                    .if_not_exists()
                    .col(pk_auto(Spectrum::Id))
                    .col(integer_null(Spectrum::AssignedTransmissionPower))
                    .col(integer_null(Spectrum::AuthorizedAntennaGain))
                    .col(integer_null(Spectrum::AuthorizedAntennaHeight))
                    .col(string_len_null(Spectrum::AuthorizedTransmitLocation, 255))
                    .col(integer_null(Spectrum::AssignedStlFrequency))
                    .col(integer_null(Spectrum::AssignedStlPower))
                    .col(string_len(Spectrum::AssignedStlLocation, 255))
                    .col(timestamp_with_time_zone_null(Spectrum::TxFreqAssignDate))
                    .col(timestamp_with_time_zone_null(Spectrum::StlFreqAssignDate))
                    .col(string_len_null(Spectrum::BandOfOperation, 255))
                    .col(string_len_null(Spectrum::ServiceAuthorized, 255))
                    .col(integer_null(Spectrum::ApplicantId))
                    .col(integer_null(Spectrum::ReportId))
                    .col(integer_null(Spectrum::AuthorizedById))
                    .col(integer_null(Spectrum::AssignedById))
                    .col(audit::active())
                    .col(audit::date_created())
                    .col(audit::date_modified())
                    .foreign_key(&mut optional_ref("fk_spectrum_applicant", Spectrum::Table, Spectrum::ApplicantId, Company::Table, Company::Id))
                    .foreign_key(&mut optional_ref("fk_spectrum_report", Spectrum::Table, Spectrum::ReportId, ResourceMeta::Table, ResourceMeta::Id))
                    .foreign_key(&mut optional_ref("fk_spectrum_authorized_by", Spectrum::Table, Spectrum::AuthorizedById, Employee::Table, Employee::Id))
                    .foreign_key(&mut optional_ref("fk_spectrum_assigned_by", Spectrum::Table, Spectrum::AssignedById, Employee::Table, Employee::Id))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Spectrum::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Spectrum {
    Table,
    Id,
    AssignedTransmissionPower,
    AuthorizedAntennaGain,
    AuthorizedAntennaHeight,
    AuthorizedTransmitLocation,
    AssignedStlFrequency,
    AssignedStlPower,
    AssignedStlLocation,
    TxFreqAssignDate,
    StlFreqAssignDate,
    BandOfOperation,
    ServiceAuthorized,
    ApplicantId,
    ReportId,
    AuthorizedById,
    AssignedById,
}

#[derive(DeriveIden)]
enum Company { Table, Id }

#[derive(DeriveIden)]
enum ResourceMeta { Table, Id }

#[derive(DeriveIden)]
enum Employee { Table, Id }
