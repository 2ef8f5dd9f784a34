use async_trait::async_trait;
use models::{company, typeapproval, unique_id};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};

use super::{applicant_id, employee_id, patch, resource_for, Names};
use crate::coerce;
use crate::errors::ServiceError;
use crate::repository::find_or_create;
use crate::resource::RegistryResource;

pub struct Typeapproval;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeapprovalView {
    pub id: i32,
    pub equipment_name: String,
    pub applicant: Option<String>,
    pub ta_unique_id: Option<String>,
    pub status_approved: bool,
    pub equipment_category: Option<String>,
    pub equipment_model: Option<String>,
    pub equipment_desc: Option<String>,
    pub applicable_standards: Option<String>,
    pub approval_rejection_date: Option<DateTimeWithTimeZone>,
    pub ta_certificate: Option<String>,
    pub assessed_by: Option<String>,
    pub report: Option<String>,
    #[serde(rename = "date_created")]
    pub date_created: DateTimeWithTimeZone,
    #[serde(rename = "date_modified")]
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTypeapproval {
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub applicant: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub ta_unique_id: Option<String>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub status_approved: Option<bool>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_category: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_model: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_desc: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub applicable_standards: Option<String>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub approval_rejection_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub ta_certificate: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assessed_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

/// The applicant is fixed once filed; everything else may change.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTypeapproval {
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub ta_unique_id: Option<String>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub status_approved: Option<bool>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_category: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_model: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub equipment_desc: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub applicable_standards: Option<String>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub approval_rejection_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub ta_certificate: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assessed_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

/// Register the approval's unique id, occupied by the applicant's name.
async fn claim_unique_id<C: ConnectionTrait>(db: &C, value: Option<&str>, applicant: Option<i32>) -> Result<(), ServiceError> {
    let Some(value) = value else { return Ok(()) };
    let occupant = match applicant {
        Some(id) => company::Entity::find_by_id(id).one(db).await?.map(|c| c.name),
        None => None,
    };
    find_or_create::<unique_id::Entity, _, _, _>(
        db,
        Condition::all().add(unique_id::Column::Value.eq(value)),
        move || unique_id::create(db, value, occupant),
    )
    .await?;
    Ok(())
}

#[async_trait]
impl RegistryResource for Typeapproval {
    type Entity = typeapproval::Entity;
    type View = TypeapprovalView;
    type Create = CreateTypeapproval;
    type Update = UpdateTypeapproval;

    const COLLECTION: &'static str = "typeapproval";
    const LABEL: &'static str = "Typeapproval";

    fn created_message() -> String {
        "Typeapproval record created successfully!".into()
    }

    async fn present(db: &DatabaseConnection, rows: Vec<typeapproval::Model>) -> Result<Vec<TypeapprovalView>, ServiceError> {
        let names = Names::load(
            db,
            rows.iter().map(|r| r.applicant_id),
            rows.iter().map(|r| r.assessed_by_id),
            rows.iter().flat_map(|r| [r.ta_certificate_id, r.report_id]),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| TypeapprovalView {
                id: r.id,
                applicant: names.company(r.applicant_id),
                ta_certificate: names.resource(r.ta_certificate_id),
                report: names.resource(r.report_id),
                assessed_by: names.employee(r.assessed_by_id),
                equipment_name: r.equipment_name,
                ta_unique_id: r.ta_unique_id,
                status_approved: r.status_approved,
                equipment_category: r.equipment_category,
                equipment_model: r.equipment_model,
                equipment_desc: r.equipment_desc,
                applicable_standards: r.applicable_standards,
                approval_rejection_date: r.approval_rejection_date,
                date_created: r.date_created,
                date_modified: r.date_modified,
            })
            .collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateTypeapproval) -> Result<i32, ServiceError> {
        let equipment_name = body.equipment_name.ok_or_else(|| ServiceError::missing("Equipment Name"))?;

        let txn = db.begin().await?;
        let applicant = applicant_id(&txn, body.applicant).await?;
        if typeapproval::exists(&txn, applicant, &equipment_name).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }
        claim_unique_id(&txn, body.ta_unique_id.as_deref(), applicant).await?;
        let am = typeapproval::ActiveModel {
            equipment_name: Set(equipment_name),
            applicant_id: Set(applicant),
            ta_unique_id: Set(body.ta_unique_id),
            status_approved: Set(body.status_approved.unwrap_or(false)),
            equipment_category: Set(body.equipment_category),
            equipment_model: Set(body.equipment_model),
            equipment_desc: Set(body.equipment_desc),
            applicable_standards: Set(body.applicable_standards),
            approval_rejection_date: Set(body.approval_rejection_date),
            ta_certificate_id: Set(resource_for(&txn, body.ta_certificate.as_deref()).await?),
            assessed_by_id: Set(employee_id(&txn, body.assessed_by).await?),
            report_id: Set(resource_for(&txn, body.report.as_deref()).await?),
            ..Default::default()
        };
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn update(
        db: &DatabaseConnection,
        current: typeapproval::Model,
        body: UpdateTypeapproval,
    ) -> Result<typeapproval::Model, ServiceError> {
        if let Some(name) = body.equipment_name.as_deref() {
            if name != current.equipment_name && typeapproval::exists(db, current.applicant_id, name).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let txn = db.begin().await?;
        claim_unique_id(&txn, body.ta_unique_id.as_deref(), current.applicant_id).await?;
        let certificate = resource_for(&txn, body.ta_certificate.as_deref()).await?;
        let report = resource_for(&txn, body.report.as_deref()).await?;
        let assessed_by = employee_id(&txn, body.assessed_by).await?;
        let mut am = current.into_active_model();
        patch!(am.equipment_name = body.equipment_name);
        patch!(am.ta_unique_id = Some body.ta_unique_id);
        patch!(am.status_approved = body.status_approved);
        patch!(am.equipment_category = Some body.equipment_category);
        patch!(am.equipment_model = Some body.equipment_model);
        patch!(am.equipment_desc = Some body.equipment_desc);
        patch!(am.applicable_standards = Some body.applicable_standards);
        patch!(am.approval_rejection_date = Some body.approval_rejection_date);
        patch!(am.ta_certificate_id = Some certificate);
        patch!(am.report_id = Some report);
        patch!(am.assessed_by_id = Some assessed_by);
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource;
    use crate::resources::company::{Companies, CreateCompany};
    use crate::test_support::get_db;

    async fn applicant(db: &DatabaseConnection, name: &str) -> anyhow::Result<i32> {
        let body = CreateCompany { name: Some(name.into()), ..Default::default() };
        Ok(resource::create::<Companies>(db, body).await?)
    }

    #[tokio::test]
    async fn unique_id_is_occupied_by_applicant() -> anyhow::Result<()> {
        let db = get_db().await?;
        let acme = applicant(&db, "ACME").await?;
        let body: CreateTypeapproval = serde_json::from_value(serde_json::json!({
            "equipmentName": "Router X1",
            "applicant": acme,
            "taUniqueId": "TA-0001",
            "statusApproved": 1,
            "taCertificate": "https://files.example.org/ta/cert.pdf"
        }))?;
        let id = resource::create::<Typeapproval>(&db, body).await?;

        let uid = unique_id::find_by_value(&db, "TA-0001").await?.expect("unique id stored");
        assert_eq!(uid.occupant.as_deref(), Some("ACME"));

        let view = resource::get::<Typeapproval>(&db, id).await?;
        assert_eq!(view["applicant"], "ACME");
        assert_eq!(view["statusApproved"], true);
        assert_eq!(view["taCertificate"], "https://files.example.org/ta/cert.pdf");

        let profile = resource::get::<Companies>(&db, acme).await?;
        assert_eq!(profile["typeapproval"][0]["equipmentName"], "Router X1");
        Ok(())
    }

    #[tokio::test]
    async fn equipment_is_unique_per_applicant() -> anyhow::Result<()> {
        let db = get_db().await?;
        let acme = applicant(&db, "ACME").await?;
        let other = applicant(&db, "Other").await?;
        let body = |applicant| CreateTypeapproval {
            equipment_name: Some("Modem".into()),
            applicant: Some(applicant),
            ..Default::default()
        };
        resource::create::<Typeapproval>(&db, body(acme)).await?;
        resource::create::<Typeapproval>(&db, body(other)).await?;
        let err = resource::create::<Typeapproval>(&db, body(acme)).await.unwrap_err();
        assert_eq!(err.to_string(), "Typeapproval already exists!");
        Ok(())
    }

    #[tokio::test]
    async fn missing_applicant_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let body = CreateTypeapproval { equipment_name: Some("Modem".into()), ..Default::default() };
        let err = resource::create::<Typeapproval>(&db, body).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.to_string(), "Applicant needed to process data");
        assert!(!typeapproval::exists(&db, None, "Modem").await?);
        Ok(())
    }

    #[tokio::test]
    async fn missing_equipment_and_unknown_applicant() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = resource::create::<Typeapproval>(&db, CreateTypeapproval::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Equipment Name cannot be empty!");

        let body = CreateTypeapproval { equipment_name: Some("Modem".into()), applicant: Some(404), ..Default::default() };
        let err = resource::create::<Typeapproval>(&db, body).await.unwrap_err();
        assert_eq!(err.to_string(), "Applicant needed to process data");
        Ok(())
    }
}
