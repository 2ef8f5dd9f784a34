use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::registry::{audited, registry_entity};
use crate::{company, employee, resource_meta};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "postal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub call_sign: String,
    pub physical_location_requirements: Option<String>,
    pub license_validity: Option<i32>,
    pub postal_article_confidentiality: Option<i32>,
    pub training_requirements: bool,
    pub qos_reqs_working_days: bool,
    pub qos_reqs_claims_policy: bool,
    pub qos_reqs_ctrl_prohibit_items: bool,
    pub qos_reqs_complaints_register: bool,
    pub notes_01: Option<String>,
    pub notes_02: Option<String>,
    pub recommendations: Option<String>,
    pub company_id: Option<i32>,
    pub report_id: Option<i32>,
    pub inspected_by_id: Option<i32>,
    pub reviewed_by_id: Option<i32>,
    pub approved_by_id: Option<i32>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Company,
    Report,
    InspectedBy,
    ReviewedBy,
    ApprovedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity).from(Column::CompanyId).to(company::Column::Id).into(),
            Relation::Report => Entity::belongs_to(resource_meta::Entity).from(Column::ReportId).to(resource_meta::Column::Id).into(),
            Relation::InspectedBy => Entity::belongs_to(employee::Entity).from(Column::InspectedById).to(employee::Column::Id).into(),
            Relation::ReviewedBy => Entity::belongs_to(employee::Entity).from(Column::ReviewedById).to(employee::Column::Id).into(),
            Relation::ApprovedBy => Entity::belongs_to(employee::Entity).from(Column::ApprovedById).to(employee::Column::Id).into(),
        }
    }
}

audited!();
registry_entity!("Postal", search: [CallSign]);

pub async fn exists<C: ConnectionTrait>(db: &C, call_sign: &str) -> Result<bool, ModelError> {
    let found = Entity::find()
        .filter(Column::CallSign.eq(call_sign))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found.is_some())
}
