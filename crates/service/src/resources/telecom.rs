use async_trait::async_trait;
use models::telecom;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{company_id, employee_id, patch, resource_for, Names};
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct Telecom;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelecomView {
    pub id: i32,
    pub service_details: String,
    pub company: Option<String>,
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
    pub outage_report: Option<String>,
    pub report: Option<String>,
    pub reviewed_by: Option<String>,
    pub approved_by: Option<String>,
    pub inspected_by: Option<String>,
    #[serde(rename = "date_created")]
    pub date_created: DateTimeWithTimeZone,
    #[serde(rename = "date_modified")]
    pub date_modified: DateTimeWithTimeZone,
}

/// Text columns shared by create and update bodies.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelecomDetails {
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_technology: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub qos_reqs_claims_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub coverage_area_details: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub sharing_requirements: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub protection_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub essential_resource_auth_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub outage_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub emergency_service_requirements: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub general_provisions: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub recommendations: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTelecom {
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_details: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub company: Option<i32>,
    #[serde(flatten)]
    pub details: TelecomDetails,
    #[serde(default, deserialize_with = "coerce::int")]
    pub reviewed_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub approved_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub inspected_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub outage_report: Option<String>,
}

// `deny_unknown_fields` does not combine with `flatten`, so the text
// columns are repeated here.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTelecom {
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_details: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_technology: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub qos_reqs_claims_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub coverage_area_details: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub sharing_requirements: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub protection_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub essential_resource_auth_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub outage_status: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub emergency_service_requirements: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub general_provisions: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub recommendations: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub reviewed_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub approved_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub inspected_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub outage_report: Option<String>,
}

#[async_trait]
impl RegistryResource for Telecom {
    type Entity = telecom::Entity;
    type View = TelecomView;
    type Create = CreateTelecom;
    type Update = UpdateTelecom;

    const COLLECTION: &'static str = "telecom";
    const LABEL: &'static str = "Telecom";

    fn created_message() -> String {
        "Telecom record created successfully!".into()
    }

    async fn present(db: &DatabaseConnection, rows: Vec<telecom::Model>) -> Result<Vec<TelecomView>, ServiceError> {
        let names = Names::load(
            db,
            rows.iter().map(|r| r.company_id),
            rows.iter().flat_map(|r| [r.reviewed_by_id, r.approved_by_id, r.inspected_by_id]),
            rows.iter().flat_map(|r| [r.report_id, r.outage_report_id]),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| TelecomView {
                id: r.id,
                company: names.company(r.company_id),
                outage_report: names.resource(r.outage_report_id),
                report: names.resource(r.report_id),
                reviewed_by: names.employee(r.reviewed_by_id),
                approved_by: names.employee(r.approved_by_id),
                inspected_by: names.employee(r.inspected_by_id),
                service_details: r.service_details,
                service_technology: r.service_technology,
                qos_reqs_claims_status: r.qos_reqs_claims_status,
                coverage_area_details: r.coverage_area_details,
                sharing_requirements: r.sharing_requirements,
                protection_status: r.protection_status,
                essential_resource_auth_status: r.essential_resource_auth_status,
                outage_status: r.outage_status,
                emergency_service_requirements: r.emergency_service_requirements,
                general_provisions: r.general_provisions,
                notes: r.notes,
                recommendations: r.recommendations,
                date_created: r.date_created,
                date_modified: r.date_modified,
            })
            .collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateTelecom) -> Result<i32, ServiceError> {
        let service_details = body.service_details.ok_or_else(|| ServiceError::missing("Service Details"))?;
        if telecom::exists(db, &service_details).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }

        let d = body.details;
        let txn = db.begin().await?;
        let am = telecom::ActiveModel {
            service_details: Set(service_details),
            company_id: Set(company_id(&txn, body.company).await?),
            service_technology: Set(d.service_technology),
            qos_reqs_claims_status: Set(d.qos_reqs_claims_status),
            coverage_area_details: Set(d.coverage_area_details),
            sharing_requirements: Set(d.sharing_requirements),
            protection_status: Set(d.protection_status),
            essential_resource_auth_status: Set(d.essential_resource_auth_status),
            outage_status: Set(d.outage_status),
            emergency_service_requirements: Set(d.emergency_service_requirements),
            general_provisions: Set(d.general_provisions),
            notes: Set(d.notes),
            recommendations: Set(d.recommendations),
            reviewed_by_id: Set(employee_id(&txn, body.reviewed_by).await?),
            approved_by_id: Set(employee_id(&txn, body.approved_by).await?),
            inspected_by_id: Set(employee_id(&txn, body.inspected_by).await?),
            report_id: Set(resource_for(&txn, body.report.as_deref()).await?),
            outage_report_id: Set(resource_for(&txn, body.outage_report.as_deref()).await?),
            ..Default::default()
        };
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: telecom::Model, body: UpdateTelecom) -> Result<telecom::Model, ServiceError> {
        if let Some(details) = body.service_details.as_deref() {
            if details != current.service_details && telecom::exists(db, details).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let txn = db.begin().await?;
        let reviewed_by = employee_id(&txn, body.reviewed_by).await?;
        let approved_by = employee_id(&txn, body.approved_by).await?;
        let inspected_by = employee_id(&txn, body.inspected_by).await?;
        let report = resource_for(&txn, body.report.as_deref()).await?;
        let outage_report = resource_for(&txn, body.outage_report.as_deref()).await?;
        let mut am = current.into_active_model();
        patch!(am.service_details = body.service_details);
        patch!(am.service_technology = Some body.service_technology);
        patch!(am.qos_reqs_claims_status = Some body.qos_reqs_claims_status);
        patch!(am.coverage_area_details = Some body.coverage_area_details);
        patch!(am.sharing_requirements = Some body.sharing_requirements);
        patch!(am.protection_status = Some body.protection_status);
        patch!(am.essential_resource_auth_status = Some body.essential_resource_auth_status);
        patch!(am.outage_status = Some body.outage_status);
        patch!(am.emergency_service_requirements = Some body.emergency_service_requirements);
        patch!(am.general_provisions = Some body.general_provisions);
        patch!(am.notes = Some body.notes);
        patch!(am.recommendations = Some body.recommendations);
        patch!(am.reviewed_by_id = Some reviewed_by);
        patch!(am.approved_by_id = Some approved_by);
        patch!(am.inspected_by_id = Some inspected_by);
        patch!(am.report_id = Some report);
        patch!(am.outage_report_id = Some outage_report);
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn both_reports_are_stored_once() -> anyhow::Result<()> {
        let db = get_db().await?;
        let body: CreateTelecom = serde_json::from_value(serde_json::json!({
            "serviceDetails": "4G LTE",
            "outageStatus": "none",
            "report": "https://files.example.org/telecom/report.pdf",
            "outageReport": "https://files.example.org/telecom/report.pdf"
        }))?;
        let id = resource::create::<Telecom>(&db, body).await?;
        let view = resource::get::<Telecom>(&db, id).await?;
        assert_eq!(view["outageStatus"], "none");
        assert_eq!(view["report"], view["outageReport"]);

        use sea_orm::{EntityTrait, PaginatorTrait};
        assert_eq!(models::resource_meta::Entity::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn service_details_required_and_unique() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = resource::create::<Telecom>(&db, CreateTelecom::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Service Details cannot be empty!");

        let body = || CreateTelecom { service_details: Some("Fibre".into()), ..Default::default() };
        let id = resource::create::<Telecom>(&db, body()).await?;
        assert!(matches!(resource::create::<Telecom>(&db, body()).await, Err(ServiceError::Conflict(_))));

        // a deep delete frees the key too
        resource::delete::<Telecom>(&db, id, true).await?;
        resource::create::<Telecom>(&db, body()).await?;
        Ok(())
    }
}
