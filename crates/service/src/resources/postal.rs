use async_trait::async_trait;
use models::postal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{company_id, employee_id, patch, resource_for, Names};
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct Postal;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalView {
    pub id: i32,
    pub call_sign: String,
    pub company: Option<String>,
    pub physical_location_requirements: Option<String>,
    pub license_validity: Option<i32>,
    pub postal_article_confidentiality: Option<i32>,
    pub training_requirements: bool,
    pub qos_requirements_working_days: bool,
    pub qos_requirements_claims_policy: bool,
    pub qos_requirements_ctrl_prohibit_items: bool,
    pub qos_requirements_complaints_register: bool,
    pub notes01: Option<String>,
    pub notes02: Option<String>,
    pub recommendations: Option<String>,
    pub inspected_by: Option<String>,
    pub reviewed_by: Option<String>,
    pub approved_by: Option<String>,
    pub report: Option<String>,
    #[serde(rename = "date_created")]
    pub date_created: DateTimeWithTimeZone,
    #[serde(rename = "date_modified")]
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostal {
    #[serde(default, deserialize_with = "coerce::text")]
    pub call_sign: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub company: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub physical_location_requirements: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub license_validity: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub postal_article_confidentiality: Option<i32>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub training_requirements: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_working_days: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_claims_policy: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_ctrl_prohibit_items: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_complaints_register: Option<bool>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes01: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes02: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub recommendations: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub inspected_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub reviewed_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub approved_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

/// Same keys as a create body except the owning company, which is fixed.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePostal {
    #[serde(default, deserialize_with = "coerce::text")]
    pub call_sign: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub physical_location_requirements: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub license_validity: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub postal_article_confidentiality: Option<i32>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub training_requirements: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_working_days: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_claims_policy: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_ctrl_prohibit_items: Option<bool>,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub qos_requirements_complaints_register: Option<bool>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes01: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub notes02: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub recommendations: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub inspected_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub reviewed_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub approved_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

#[async_trait]
impl RegistryResource for Postal {
    type Entity = postal::Entity;
    type View = PostalView;
    type Create = CreatePostal;
    type Update = UpdatePostal;

    const COLLECTION: &'static str = "postal";
    const LABEL: &'static str = "Postal";

    fn created_message() -> String {
        "Postal record created successfully!".into()
    }

    async fn present(db: &DatabaseConnection, rows: Vec<postal::Model>) -> Result<Vec<PostalView>, ServiceError> {
        let names = Names::load(
            db,
            rows.iter().map(|r| r.company_id),
            rows.iter().flat_map(|r| [r.inspected_by_id, r.reviewed_by_id, r.approved_by_id]),
            rows.iter().map(|r| r.report_id),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| PostalView {
                id: r.id,
                company: names.company(r.company_id),
                inspected_by: names.employee(r.inspected_by_id),
                reviewed_by: names.employee(r.reviewed_by_id),
                approved_by: names.employee(r.approved_by_id),
                report: names.resource(r.report_id),
                call_sign: r.call_sign,
                physical_location_requirements: r.physical_location_requirements,
                license_validity: r.license_validity,
                postal_article_confidentiality: r.postal_article_confidentiality,
                training_requirements: r.training_requirements,
                qos_requirements_working_days: r.qos_reqs_working_days,
                qos_requirements_claims_policy: r.qos_reqs_claims_policy,
                qos_requirements_ctrl_prohibit_items: r.qos_reqs_ctrl_prohibit_items,
                qos_requirements_complaints_register: r.qos_reqs_complaints_register,
                notes01: r.notes_01,
                notes02: r.notes_02,
                recommendations: r.recommendations,
                date_created: r.date_created,
                date_modified: r.date_modified,
            })
            .collect())
    }

    async fn create(db: &DatabaseConnection, body: CreatePostal) -> Result<i32, ServiceError> {
        let call_sign = body.call_sign.ok_or_else(|| ServiceError::missing("Call Sign"))?;
        if postal::exists(db, &call_sign).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }

        let txn = db.begin().await?;
        let am = postal::ActiveModel {
            call_sign: Set(call_sign),
            company_id: Set(company_id(&txn, body.company).await?),
            physical_location_requirements: Set(body.physical_location_requirements),
            license_validity: Set(body.license_validity),
            postal_article_confidentiality: Set(body.postal_article_confidentiality),
            training_requirements: Set(body.training_requirements.unwrap_or(false)),
            qos_reqs_working_days: Set(body.qos_requirements_working_days.unwrap_or(false)),
            qos_reqs_claims_policy: Set(body.qos_requirements_claims_policy.unwrap_or(false)),
            qos_reqs_ctrl_prohibit_items: Set(body.qos_requirements_ctrl_prohibit_items.unwrap_or(false)),
            qos_reqs_complaints_register: Set(body.qos_requirements_complaints_register.unwrap_or(false)),
            notes_01: Set(body.notes01),
            notes_02: Set(body.notes02),
            recommendations: Set(body.recommendations),
            inspected_by_id: Set(employee_id(&txn, body.inspected_by).await?),
            reviewed_by_id: Set(employee_id(&txn, body.reviewed_by).await?),
            approved_by_id: Set(employee_id(&txn, body.approved_by).await?),
            report_id: Set(resource_for(&txn, body.report.as_deref()).await?),
            ..Default::default()
        };
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: postal::Model, body: UpdatePostal) -> Result<postal::Model, ServiceError> {
        if let Some(call_sign) = body.call_sign.as_deref() {
            if call_sign != current.call_sign && postal::exists(db, call_sign).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let txn = db.begin().await?;
        let inspected_by = employee_id(&txn, body.inspected_by).await?;
        let reviewed_by = employee_id(&txn, body.reviewed_by).await?;
        let approved_by = employee_id(&txn, body.approved_by).await?;
        let report = resource_for(&txn, body.report.as_deref()).await?;
        let mut am = current.into_active_model();
        patch!(am.call_sign = body.call_sign);
        patch!(am.physical_location_requirements = Some body.physical_location_requirements);
        patch!(am.license_validity = Some body.license_validity);
        patch!(am.postal_article_confidentiality = Some body.postal_article_confidentiality);
        patch!(am.training_requirements = body.training_requirements);
        patch!(am.qos_reqs_working_days = body.qos_requirements_working_days);
        patch!(am.qos_reqs_claims_policy = body.qos_requirements_claims_policy);
        patch!(am.qos_reqs_ctrl_prohibit_items = body.qos_requirements_ctrl_prohibit_items);
        patch!(am.qos_reqs_complaints_register = body.qos_requirements_complaints_register);
        patch!(am.notes_01 = Some body.notes01);
        patch!(am.notes_02 = Some body.notes02);
        patch!(am.recommendations = Some body.recommendations);
        patch!(am.inspected_by_id = Some inspected_by);
        patch!(am.reviewed_by_id = Some reviewed_by);
        patch!(am.approved_by_id = Some approved_by);
        patch!(am.report_id = Some report);
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
    async fn flags_default_to_false_and_accept_strings() -> anyhow::Result<()> {
        let db = get_db().await?;
        let body: CreatePostal = serde_json::from_value(serde_json::json!({
            "callSign": "POST-01",
            "licenseValidity": "5",
            "qosRequirementsWorkingDays": "yes",
            "notes01": "  first visit  "
        }))?;
        let id = resource::create::<Postal>(&db, body).await?;
        let view = resource::get::<Postal>(&db, id).await?;
        assert_eq!(view["callSign"], "POST-01");
        assert_eq!(view["licenseValidity"], 5);
        assert_eq!(view["qosRequirementsWorkingDays"], true);
        assert_eq!(view["qosRequirementsClaimsPolicy"], false);
        assert_eq!(view["trainingRequirements"], false);
        assert_eq!(view["notes01"], "first visit");
        Ok(())
    }

    #[tokio::test]
    async fn call_sign_rename_conflicts() -> anyhow::Result<()> {
        let db = get_db().await?;
        resource::create::<Postal>(&db, CreatePostal { call_sign: Some("A".into()), ..Default::default() }).await?;
        let b = resource::create::<Postal>(&db, CreatePostal { call_sign: Some("B".into()), ..Default::default() }).await?;

        let err = resource::update::<Postal>(&db, b, UpdatePostal { call_sign: Some("A".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let view = resource::update::<Postal>(&db, b, UpdatePostal { notes02: Some("ok".into()), ..Default::default() }).await?;
        assert_eq!(view.call_sign, "B");
        assert_eq!(view.notes02.as_deref(), Some("ok"));
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_unknown_keys() {
        let parsed: Result<UpdatePostal, _> = serde_json::from_value(serde_json::json!({"company": 3}));
        assert!(parsed.is_err());
    }
}
