use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::registry::{audited, registry_entity};
use crate::{company, employee, resource_meta};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spectrum")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub assigned_transmission_power: Option<i32>,
    pub authorized_antenna_gain: Option<i32>,
    pub authorized_antenna_height: Option<i32>,
    pub authorized_transmit_location: Option<String>,
    pub assigned_stl_frequency: Option<i32>,
    pub assigned_stl_power: Option<i32>,
    pub assigned_stl_location: String,
    pub tx_freq_assign_date: Option<DateTimeWithTimeZone>,
    pub stl_freq_assign_date: Option<DateTimeWithTimeZone>,
    pub band_of_operation: Option<String>,
    pub service_authorized: Option<String>,
    pub applicant_id: Option<i32>,
    pub report_id: Option<i32>,
    pub authorized_by_id: Option<i32>,
    pub assigned_by_id: Option<i32>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Applicant,
    Report,
    AuthorizedBy,
    AssignedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Applicant => Entity::belongs_to(company::Entity).from(Column::ApplicantId).to(company::Column::Id).into(),
            Relation::Report => Entity::belongs_to(resource_meta::Entity).from(Column::ReportId).to(resource_meta::Column::Id).into(),
            Relation::AuthorizedBy => Entity::belongs_to(employee::Entity).from(Column::AuthorizedById).to(employee::Column::Id).into(),
            Relation::AssignedBy => Entity::belongs_to(employee::Entity).from(Column::AssignedById).to(employee::Column::Id).into(),
        }
    }
}

audited!();
registry_entity!("Spectrum", search: [BandOfOperation, ServiceAuthorized]);

pub async fn exists<C: ConnectionTrait>(db: &C, assigned_stl_location: &str) -> Result<bool, ModelError> {
    let found = Entity::find()
        .filter(Column::AssignedStlLocation.eq(assigned_stl_location))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found.is_some())
}
