use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::registry::{audited, registry_entity};
use crate::{company, employee, resource_meta};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "numbering")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub service_category: String,
    pub number_type: Option<String>,
    pub applicable_service_type: Option<String>,
    pub description: Option<String>,
    pub assigned_range: Option<i32>,
    pub assigned_number: Option<i32>,
    pub assignment_date: Option<DateTimeWithTimeZone>,
    pub last_auth_renewal_date: Option<DateTimeWithTimeZone>,
    pub is_compliant: bool,
    pub notes: Option<String>,
    pub recommendations: Option<String>,
    pub service_provider_id: Option<i32>,
    pub report_id: Option<i32>,
    pub assigned_by_id: Option<i32>,
    pub last_updated_by_id: Option<i32>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ServiceProvider,
    Report,
    AssignedBy,
    LastUpdatedBy,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceProvider => Entity::belongs_to(company::Entity).from(Column::ServiceProviderId).to(company::Column::Id).into(),
            Relation::Report => Entity::belongs_to(resource_meta::Entity).from(Column::ReportId).to(resource_meta::Column::Id).into(),
            Relation::AssignedBy => Entity::belongs_to(employee::Entity).from(Column::AssignedById).to(employee::Column::Id).into(),
            Relation::LastUpdatedBy => Entity::belongs_to(employee::Entity).from(Column::LastUpdatedById).to(employee::Column::Id).into(),
        }
    }
}

audited!();
registry_entity!("Numbering", search: [ServiceCategory, Description]);

/// Assigned numbers are unique among active records.
pub async fn exists<C: ConnectionTrait>(db: &C, assigned_number: i32) -> Result<bool, ModelError> {
    let found = Entity::find()
        .filter(Column::AssignedNumber.eq(assigned_number))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found.is_some())
}
