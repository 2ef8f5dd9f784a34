use sea_orm::{entity::prelude::*, ConnectionTrait};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::registry::{audited, registry_entity};
use crate::{company, employee, resource_meta};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "typeapproval")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub equipment_category: Option<String>,
    pub status_approved: bool,
    pub equipment_name: String,
    pub equipment_model: Option<String>,
    pub equipment_desc: Option<String>,
    pub applicable_standards: Option<String>,
    pub approval_rejection_date: Option<DateTimeWithTimeZone>,
    pub ta_unique_id: Option<String>,
    pub ta_certificate_id: Option<i32>,
    pub report_id: Option<i32>,
    pub assessed_by_id: Option<i32>,
    pub applicant_id: Option<i32>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Certificate,
    Report,
    AssessedBy,
    Applicant,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Certificate => Entity::belongs_to(resource_meta::Entity).from(Column::TaCertificateId).to(resource_meta::Column::Id).into(),
            Relation::Report => Entity::belongs_to(resource_meta::Entity).from(Column::ReportId).to(resource_meta::Column::Id).into(),
            Relation::AssessedBy => Entity::belongs_to(employee::Entity).from(Column::AssessedById).to(employee::Column::Id).into(),
            Relation::Applicant => Entity::belongs_to(company::Entity).from(Column::ApplicantId).to(company::Column::Id).into(),
        }
    }
}

audited!();
registry_entity!("Typeapproval", search: [TaUniqueId, EquipmentName]);

/// One approval per applicant and equipment name among active records.
pub async fn exists<C: ConnectionTrait>(db: &C, applicant_id: Option<i32>, equipment_name: &str) -> Result<bool, ModelError> {
    let applicant = match applicant_id {
        Some(id) => Column::ApplicantId.eq(id),
        None => Column::ApplicantId.is_null(),
    };
    let found = Entity::find()
        .filter(applicant)
        .filter(Column::EquipmentName.eq(equipment_name))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found.is_some())
}
