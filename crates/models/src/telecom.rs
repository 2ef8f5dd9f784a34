use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::registry::{audited, registry_entity};
use crate::{company, employee, resource_meta};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "telecom")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_details: String,
    pub service_technology: Option<String>,
    pub qos_reqs_claims_status: Option<String>,
    pub coverage_area_details: Option<String>,
    pub sharing_requirements: Option<String>,
    pub protection_status: Option<String>,
    pub essential_resource_auth_status: Option<String>,
    pub outage_status: Option<String>,
    pub emergency_service_requirements: Option<String>,
    pub general_provisions: Option<String>,
    pub notes: Option<String>,
    pub recommendations: Option<String>,
    pub company_id: Option<i32>,
    pub outage_report_id: Option<i32>,
    pub report_id: Option<i32>,
    pub reviewed_by_id: Option<i32>,
    pub approved_by_id: Option<i32>,
    pub inspected_by_id: Option<i32>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    OutageReport,
    Report,
    ReviewedBy,
    ApprovedBy,
    InspectedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
            Relation::OutageReport => Entity::belongs_to(resource_meta::Entity).from(Column::OutageReportId).to(resource_meta::Column::Id).into(),
            Relation::Report => Entity::belongs_to(resource_meta::Entity).from(Column::ReportId).to(resource_meta::Column::Id).into(),
            Relation::ReviewedBy => Entity::belongs_to(employee::Entity).from(Column::ReviewedById).to(employee::Column::Id).into(),
            Relation::ApprovedBy => Entity::belongs_to(employee::Entity).from(Column::ApprovedById).to(employee::Column::Id).into(),
            Relation::InspectedBy => Entity::belongs_to(employee::Entity).from(Column::InspectedById).to(employee::Column::Id).into(),
        }
    }
}

audited!();
registry_entity!("Telecom", search: [ServiceDetails]);

pub async fn exists<C: ConnectionTrait>(db: &C, service_details: &str) -> Result<bool, ModelError> {
    let found = Entity::find()
        .filter(Column::ServiceDetails.eq(service_details))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found.is_some())
}
