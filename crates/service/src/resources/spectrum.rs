use async_trait::async_trait;
use models::spectrum;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use super::{applicant_id, employee_id, patch, resource_for, Names};
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct Spectrum;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumView {
    pub id: i32,
    pub applicant: Option<String>,
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
    pub authorized_by: Option<String>,
    pub assigned_by: Option<String>,
    pub report: Option<String>,
    #[serde(rename = "date_created")]
    pub date_created: DateTimeWithTimeZone,
    #[serde(rename = "date_modified")]
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpectrum {
    #[serde(default, deserialize_with = "coerce::text")]
    pub assigned_stl_location: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub applicant: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_transmission_power: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub authorized_antenna_gain: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub authorized_antenna_height: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub authorized_transmit_location: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_stl_frequency: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_stl_power: Option<i32>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub tx_freq_assign_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub stl_freq_assign_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub band_of_operation: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_authorized: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub authorized_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSpectrum {
    #[serde(default, deserialize_with = "coerce::text")]
    pub assigned_stl_location: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_transmission_power: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub authorized_antenna_gain: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub authorized_antenna_height: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub authorized_transmit_location: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_stl_frequency: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_stl_power: Option<i32>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub tx_freq_assign_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::date")]
    pub stl_freq_assign_date: Option<DateTimeWithTimeZone>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub band_of_operation: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub service_authorized: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub assigned_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub authorized_by: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub report: Option<String>,
}

#[async_trait]
impl RegistryResource for Spectrum {
    type Entity = spectrum::Entity;
    type View = SpectrumView;
    type Create = CreateSpectrum;
    type Update = UpdateSpectrum;

    const COLLECTION: &'static str = "spectrum";
    const LABEL: &'static str = "Spectrum";

    fn created_message() -> String {
        "Spectrum record created successfully!".into()
    }

    async fn present(db: &DatabaseConnection, rows: Vec<spectrum::Model>) -> Result<Vec<SpectrumView>, ServiceError> {
        let names = Names::load(
            db,
            rows.iter().map(|r| r.applicant_id),
            rows.iter().flat_map(|r| [r.authorized_by_id, r.assigned_by_id]),
            rows.iter().map(|r| r.report_id),
        )
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| SpectrumView {
                id: r.id,
                applicant: names.company(r.applicant_id),
                authorized_by: names.employee(r.authorized_by_id),
                assigned_by: names.employee(r.assigned_by_id),
                report: names.resource(r.report_id),
                assigned_transmission_power: r.assigned_transmission_power,
                authorized_antenna_gain: r.authorized_antenna_gain,
                authorized_antenna_height: r.authorized_antenna_height,
                authorized_transmit_location: r.authorized_transmit_location,
                assigned_stl_frequency: r.assigned_stl_frequency,
                assigned_stl_power: r.assigned_stl_power,
                assigned_stl_location: r.assigned_stl_location,
                tx_freq_assign_date: r.tx_freq_assign_date,
                stl_freq_assign_date: r.stl_freq_assign_date,
                band_of_operation: r.band_of_operation,
                service_authorized: r.service_authorized,
                date_created: r.date_created,
                date_modified: r.date_modified,
            })
            .collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateSpectrum) -> Result<i32, ServiceError> {
        let location = body.assigned_stl_location.ok_or_else(|| ServiceError::missing("Assigned STL Location"))?;
        if spectrum::exists(db, &location).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }

        let txn = db.begin().await?;
        let am = spectrum::ActiveModel {
            assigned_stl_location: Set(location),
            applicant_id: Set(applicant_id(&txn, body.applicant).await?),
            assigned_transmission_power: Set(body.assigned_transmission_power),
            authorized_antenna_gain: Set(body.authorized_antenna_gain),
            authorized_antenna_height: Set(body.authorized_antenna_height),
            authorized_transmit_location: Set(body.authorized_transmit_location),
            assigned_stl_frequency: Set(body.assigned_stl_frequency),
            assigned_stl_power: Set(body.assigned_stl_power),
            tx_freq_assign_date: Set(body.tx_freq_assign_date),
            stl_freq_assign_date: Set(body.stl_freq_assign_date),
            band_of_operation: Set(body.band_of_operation),
            service_authorized: Set(body.service_authorized),
            assigned_by_id: Set(employee_id(&txn, body.assigned_by).await?),
            authorized_by_id: Set(employee_id(&txn, body.authorized_by).await?),
            report_id: Set(resource_for(&txn, body.report.as_deref()).await?),
            ..Default::default()
        };
        let created = am.insert(&txn).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: spectrum::Model, body: UpdateSpectrum) -> Result<spectrum::Model, ServiceError> {
        if let Some(location) = body.assigned_stl_location.as_deref() {
            if location != current.assigned_stl_location && spectrum::exists(db, location).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let txn = db.begin().await?;
        let assigned_by = employee_id(&txn, body.assigned_by).await?;
        let authorized_by = employee_id(&txn, body.authorized_by).await?;
        let report = resource_for(&txn, body.report.as_deref()).await?;
        let mut am = current.into_active_model();
        patch!(am.assigned_stl_location = body.assigned_stl_location);
        patch!(am.assigned_transmission_power = Some body.assigned_transmission_power);
        patch!(am.authorized_antenna_gain = Some body.authorized_antenna_gain);
        patch!(am.authorized_antenna_height = Some body.authorized_antenna_height);
        patch!(am.authorized_transmit_location = Some body.authorized_transmit_location);
        patch!(am.assigned_stl_frequency = Some body.assigned_stl_frequency);
        patch!(am.assigned_stl_power = Some body.assigned_stl_power);
        patch!(am.tx_freq_assign_date = Some body.tx_freq_assign_date);
        patch!(am.stl_freq_assign_date = Some body.stl_freq_assign_date);
        patch!(am.band_of_operation = Some body.band_of_operation);
        patch!(am.service_authorized = Some body.service_authorized);
        patch!(am.assigned_by_id = Some assigned_by);
        patch!(am.authorized_by_id = Some authorized_by);
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
    use crate::resources::company::{Companies, CreateCompany};
    use crate::test_support::get_db;

    async fn applicant(db: &DatabaseConnection) -> anyhow::Result<i32> {
        let body = CreateCompany { name: Some("Radio One".into()), ..Default::default() };
        Ok(resource::create::<Companies>(db, body).await?)
    }

    #[tokio::test]
    async fn unknown_applicant_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let body = CreateSpectrum { assigned_stl_location: Some("Mt Elgon".into()), applicant: Some(99), ..Default::default() };
        let err = resource::create::<Spectrum>(&db, body).await.unwrap_err();
        assert_eq!(err.to_string(), "Applicant needed to process data");
        Ok(())
    }

    #[tokio::test]
    async fn missing_applicant_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let body = CreateSpectrum { assigned_stl_location: Some("Mt Elgon".into()), ..Default::default() };
        let err = resource::create::<Spectrum>(&db, body).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.to_string(), "Applicant needed to process data");
        assert!(!spectrum::exists(&db, "Mt Elgon").await?);
        Ok(())
    }

    #[tokio::test]
    async fn dates_accept_short_day_first_format() -> anyhow::Result<()> {
        let db = get_db().await?;
        let radio = applicant(&db).await?;
        let body: CreateSpectrum = serde_json::from_value(serde_json::json!({
            "assignedStlLocation": "Kololo",
            "applicant": radio,
            "txFreqAssignDate": "14-02-22",
            "assignedStlFrequency": 88,
            "bandOfOperation": "VHF"
        }))?;
        let id = resource::create::<Spectrum>(&db, body).await?;
        let view = resource::get::<Spectrum>(&db, id).await?;
        assert!(view["txFreqAssignDate"].as_str().unwrap_or_default().starts_with("2022-02-14"));
        assert_eq!(view["assignedStlFrequency"], 88);

        let dup = CreateSpectrum { assigned_stl_location: Some("Kololo".into()), applicant: Some(radio), ..Default::default() };
        let err = resource::create::<Spectrum>(&db, dup)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Spectrum already exists!");
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_band() -> anyhow::Result<()> {
        use crate::pagination::PageRequest;
        let db = get_db().await?;
        let radio = applicant(&db).await?;
        for (location, band) in [("A", "UHF"), ("B", "VHF")] {
            let body = CreateSpectrum {
                assigned_stl_location: Some(location.into()),
                applicant: Some(radio),
                band_of_operation: Some(band.into()),
                ..Default::default()
            };
            resource::create::<Spectrum>(&db, body).await?;
        }
        let page = resource::list::<Spectrum>(&db, Some("uhf"), PageRequest::parse(None, None, 30)?).await?;
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].assigned_stl_location, "A");
        Ok(())
    }
}
