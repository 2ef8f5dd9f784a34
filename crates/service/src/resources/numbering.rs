use async_trait::async_trait;
use models::numbering;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{company_id, employee_id, patch, resource_for, Names};
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct Numbering;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberingView {
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
    pub service_provider: Option<String>,
    pub assigned_by: Option<String>,
    pub last_updated_by: Option<String>,
    pub report: Option<String>,
    #[serde(rename = "date_created")]
    pub date_created: DateTimeWithTimeZone,
    #[serde(rename = "date_modified")]
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNumbering {
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_category: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub service_provider: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub number_type: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub applicable_service_type: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_range: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_number: Option<i32>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub assignment_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub last_auth_renewal_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_compliant: Option<bool>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub recommendations: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateNumbering {
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_category: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub number_type: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub applicable_service_type: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_range: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_number: Option<i32>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub assignment_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub last_auth_renewal_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub is_compliant: Option<bool>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub recommendations: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub last_updated_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

#[async_trait]
impl RegistryResource for Numbering {
    type Entity = numbering::Entity;
    type View = NumberingView;
    type Create = CreateNumbering;
    type Update = UpdateNumbering;

    const COLLECTION: &'static str = "numbering";
    const LABEL: &'static str = "Numbering";

    fn created_message() -> String {
        "Numbering record created successfully!".into()
    }

    async fn present(db: &DatabaseConnection, rows: Vec<numbering::Model>) -> Result<Vec<NumberingView>, ServiceError> {
        let names = Names::load(
            db,
            rows.iter().map(|r| r.service_provider_id),
            rows.iter().flat_map(|r| [r.assigned_by_id, r.last_updated_by_id]),
            rows.iter().map(|r| r.report_id),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| NumberingView {
                id: r.id,
                service_provider: names.company(r.service_provider_id),
                assigned_by: names.employee(r.assigned_by_id),
                last_updated_by: names.employee(r.last_updated_by_id),
                report: names.resource(r.report_id),
                service_category: r.service_category,
                number_type: r.number_type,
                applicable_service_type: r.applicable_service_type,
                description: r.description,
                assigned_range: r.assigned_range,
                assigned_number: r.assigned_number,
                assignment_date: r.assignment_date,
                last_auth_renewal_date: r.last_auth_renewal_date,
                is_compliant: r.is_compliant,
                notes: r.notes,
                recommendations: r.recommendations,
                date_created: r.date_created,
                date_modified: r.date_modified,
            })
            .collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateNumbering) -> Result<i32, ServiceError> {
        let category = body.service_category.ok_or_else(|| ServiceError::missing("Service Category"))?;
        if let Some(number) = body.assigned_number {
            if numbering::exists(db, number).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }

        let txn = db.begin().await?;
        let am = numbering::ActiveModel {
            service_category: Set(category),
            service_provider_id: Set(company_id(&txn, body.service_provider).await?),
            number_type: Set(body.number_type),
            applicable_service_type: Set(body.applicable_service_type),
            description: Set(body.description),
            assigned_range: Set(body.assigned_range),
            assigned_number: Set(body.assigned_number),
            assignment_date: Set(body.assignment_date),
            last_auth_renewal_date: Set(body.last_auth_renewal_date),
            is_compliant: Set(body.is_compliant.unwrap_or(true)),
            notes: Set(body.notes),
            recommendations: Set(body.recommendations),
            assigned_by_id: Set(employee_id(&txn, body.assigned_by).await?),
            report_id: Set(resource_for(&txn, body.report.as_deref()).await?),
            ..Default::default()
        };
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: numbering::Model, body: UpdateNumbering) -> Result<numbering::Model, ServiceError> {
        if let Some(number) = body.assigned_number {
            if Some(number) != current.assigned_number && numbering::exists(db, number).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let txn = db.begin().await?;
        let last_updated_by = employee_id(&txn, body.last_updated_by).await?;
        let report = resource_for(&txn, body.report.as_deref()).await?;
        let mut am = current.into_active_model();
        patch!(am.service_category = body.service_category);
        patch!(am.number_type = Some body.number_type);
        patch!(am.applicable_service_type = Some body.applicable_service_type);
        patch!(am.description = Some body.description);
        patch!(am.assigned_range = Some body.assigned_range);
        patch!(am.assigned_number = Some body.assigned_number);
        patch!(am.assignment_date = Some body.assignment_date);
        patch!(am.last_auth_renewal_date = Some body.last_auth_renewal_date);
        patch!(am.is_compliant = body.is_compliant);
        patch!(am.notes = Some body.notes);
        patch!(am.recommendations = Some body.recommendations);
        patch!(am.last_updated_by_id = Some last_updated_by);
        patch!(am.report_id = Some report);
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }
}
