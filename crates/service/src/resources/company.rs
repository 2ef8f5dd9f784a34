use std::collections::HashMap;

use async_trait::async_trait;
use models::company::{self, NewCompany};
use models::{address, contact, contact_person, numbering, person, postal, spectrum, telecom, typeapproval};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{contact_person_for, patch};
use crate::coerce;
use crate::errors::ServiceError;
use crate::repository::find_or_create;
use crate::resource::RegistryResource;

pub struct Companies;

#[derive(Debug, Clone, Serialize)]
pub struct CompanyAddress {
    pub district: Option<String>,
    pub postal: Option<String>,
    pub country: Option<String>,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactPeople {
    pub email: Option<String>,
    pub person: String,
}

#[derive(Debug, Serialize)]
pub struct CompanyView {
    pub id: i32,
    pub name: String,
    pub address: Option<CompanyAddress>,
    pub tech_person: Option<ContactPeople>,
    pub legal_person: Option<ContactPeople>,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompany {
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address1: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address2: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tech_person_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tech_person_email: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub legal_person_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub legal_person_email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCompany {
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address1: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address2: Option<String>,
}

/// Address row for a body's address fields, reused by first line.
async fn address_for<C: ConnectionTrait>(
    db: &C,
    line: Option<String>,
    line2: Option<String>,
    district: Option<String>,
    postal: Option<String>,
    country: Option<String>,
) -> Result<Option<i32>, ServiceError> {
    let Some(line) = line else { return Ok(None) };
    let (a, _) = find_or_create::<address::Entity, _, _, _>(
        db,
        Condition::all().add(address::Column::AddressLine1.eq(line.as_str())),
        || {
            address::create(
                db,
                address::NewAddress {
                    address_line_1: line.clone(),
                    address_line_2: line2,
                    district,
                    postal_code: postal,
                    country,
                },
            )
        },
    )
    .await?;
    Ok(Some(a.id))
}

/// A named contact is only recorded when both its name and email are given.
async fn named_contact<C: ConnectionTrait>(
    db: &C,
    name: Option<String>,
    email: Option<String>,
) -> Result<Option<i32>, ServiceError> {
    let (Some(name), Some(email)) = (name, email) else { return Ok(None) };
    let (first, last) = person::split_name(&name);
    let cp = contact_person_for(db, first, last, contact::NewContact { email, ..Default::default() }).await?;
    Ok(Some(cp.id))
}

/// Name and email for each contact person id.
async fn contact_people<C: ConnectionTrait>(db: &C, ids: Vec<i32>) -> Result<HashMap<i32, ContactPeople>, ServiceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = contact_person::Entity::find()
        .filter(contact_person::Column::Id.is_in(ids))
        .find_also_related(person::Entity)
        .all(db)
        .await?;
    let contacts: HashMap<i32, contact::Model> = contact::Entity::find()
        .filter(contact::Column::Id.is_in(rows.iter().map(|(cp, _)| cp.contact_id)))
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    Ok(rows
        .into_iter()
        .map(|(cp, p)| {
            let people = ContactPeople {
                email: contacts.get(&cp.contact_id).and_then(|c| c.email.clone()),
                person: p.map(|p| p.full_name()).unwrap_or_default(),
            };
            (cp.id, people)
        })
        .collect())
}

#[async_trait]
impl RegistryResource for Companies {
    type Entity = company::Entity;
    type View = CompanyView;
    type Create = CreateCompany;
    type Update = UpdateCompany;

    const COLLECTION: &'static str = "companies";
    const LABEL: &'static str = "Company";

    async fn present(db: &DatabaseConnection, rows: Vec<company::Model>) -> Result<Vec<CompanyView>, ServiceError> {
        let address_ids: Vec<i32> = rows.iter().filter_map(|c| c.address_id).collect();
        let addresses: HashMap<i32, address::Model> = if address_ids.is_empty() {
            HashMap::new()
        } else {
            address::Entity::find()
                .filter(address::Column::Id.is_in(address_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|a| (a.id, a))
                .collect()
        };
        let people_ids = rows.iter().flat_map(|c| [c.tech_person_id, c.legal_person_id]).flatten().collect();
        let people = contact_people(db, people_ids).await?;

        Ok(rows
            .into_iter()
            .map(|c| CompanyView {
                id: c.id,
                address: c.address_id.and_then(|id| addresses.get(&id)).map(|a| CompanyAddress {
                    district: a.district.clone(),
                    postal: a.postal_code.clone(),
                    country: a.country.clone(),
                    address_line_1: a.address_line_1.clone(),
                    address_line_2: a.address_line_2.clone(),
                }),
                tech_person: c.tech_person_id.and_then(|id| people.get(&id).cloned()),
                legal_person: c.legal_person_id.and_then(|id| people.get(&id).cloned()),
                name: c.name,
                date_created: c.date_created,
                date_modified: c.date_modified,
            })
            .collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateCompany) -> Result<i32, ServiceError> {
        let name = body.name.ok_or_else(|| ServiceError::missing("Name"))?;
        if company::exists(db, &name).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }

        let txn = db.begin().await?;
        let address_id = address_for(&txn, body.address1, body.address2, body.district, body.postal, body.country).await?;
        let tech_person_id = named_contact(&txn, body.tech_person_name, body.tech_person_email).await?;
        let legal_person_id = named_contact(&txn, body.legal_person_name, body.legal_person_email).await?;
        let created = company::create(&txn, NewCompany { name, address_id, legal_person_id, tech_person_id }).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: company::Model, body: UpdateCompany) -> Result<company::Model, ServiceError> {
        if let Some(name) = body.name.as_deref() {
            if name != current.name && company::exists(db, name).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let txn = db.begin().await?;
        let address_id = address_for(&txn, body.address1, body.address2, body.district, body.postal, body.country).await?;
        let mut am = current.into_active_model();
        patch!(am.name = body.name);
        patch!(am.address_id = Some address_id);
        let updated = am.update(&txn).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// The company together with every active record filed against it.
    async fn detail(db: &DatabaseConnection, model: company::Model) -> Result<serde_json::Value, ServiceError> {
        use super::{Numbering, Postal, Spectrum, Telecom, Typeapproval};

        let id = model.id;
        let numbering = numbering::Entity::find()
            .filter(numbering::Column::ServiceProviderId.eq(id))
            .filter(numbering::Column::Active.eq(true))
            .order_by_desc(numbering::Column::DateCreated)
            .all(db)
            .await?;
        let postal = postal::Entity::find()
            .filter(postal::Column::CompanyId.eq(id))
            .filter(postal::Column::Active.eq(true))
            .order_by_desc(postal::Column::DateCreated)
            .all(db)
            .await?;
        let spectrum = spectrum::Entity::find()
            .filter(spectrum::Column::ApplicantId.eq(id))
            .filter(spectrum::Column::Active.eq(true))
            .order_by_desc(spectrum::Column::DateCreated)
            .all(db)
            .await?;
        let telecom = telecom::Entity::find()
            .filter(telecom::Column::CompanyId.eq(id))
            .filter(telecom::Column::Active.eq(true))
            .order_by_desc(telecom::Column::DateCreated)
            .all(db)
            .await?;
        let typeapproval = typeapproval::Entity::find()
            .filter(typeapproval::Column::ApplicantId.eq(id))
            .filter(typeapproval::Column::Active.eq(true))
            .order_by_desc(typeapproval::Column::DateCreated)
            .all(db)
            .await?;

        let company = Self::present(db, vec![model]).await?.pop();
        Ok(json!({
            "company": company,
            "numbering": Numbering::present(db, numbering).await?,
            "postal": Postal::present(db, postal).await?,
            "spectrum": Spectrum::present(db, spectrum).await?,
            "telecom": Telecom::present(db, telecom).await?,
            "typeapproval": Typeapproval::present(db, typeapproval).await?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource;
    use crate::test_support::get_db;
    use sea_orm::PaginatorTrait;

    fn movers() -> CreateCompany {
        CreateCompany {
            name: Some("MOVERS".into()),
            address1: Some("Plot 1 Kampala Rd".into()),
            country: Some("Uganda".into()),
            tech_person_name: Some("Jane Tech".into()),
            tech_person_email: Some("jane@movers.ug".into()),
            legal_person_name: Some("John Law".into()),
            legal_person_email: Some("john@movers.ug".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_builds_related_rows_once() -> anyhow::Result<()> {
        let db = get_db().await?;
        let id = resource::create::<Companies>(&db, movers()).await?;

        let mut other = movers();
        other.name = Some("SHAKERS".into());
        resource::create::<Companies>(&db, other).await?;

        // address and both contact persons are shared by the two companies
        assert_eq!(address::Entity::find().count(&db).await?, 1);
        assert_eq!(contact_person::Entity::find().count(&db).await?, 2);

        let view = resource::get::<Companies>(&db, id).await?;
        assert_eq!(view["company"]["name"], "MOVERS");
        assert_eq!(view["company"]["address"]["address_line_1"], "Plot 1 Kampala Rd");
        assert_eq!(view["company"]["tech_person"]["person"], "Jane Tech");
        assert_eq!(view["company"]["legal_person"]["email"], "john@movers.ug");
        assert_eq!(view["numbering"], json!([]));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_and_missing_name_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        resource::create::<Companies>(&db, movers()).await?;
        let err = resource::create::<Companies>(&db, movers()).await.unwrap_err();
        assert_eq!(err.to_string(), "Company already exists!");

        let err = resource::create::<Companies>(&db, CreateCompany::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Name cannot be empty!");
        Ok(())
    }

    #[tokio::test]
    async fn contact_without_email_is_skipped() -> anyhow::Result<()> {
        let db = get_db().await?;
        let body = CreateCompany { name: Some("Solo".into()), tech_person_name: Some("No Mail".into()), ..Default::default() };
        let id = resource::create::<Companies>(&db, body).await?;
        let view = resource::get::<Companies>(&db, id).await?;
        assert!(view["company"]["tech_person"].is_null());
        assert!(view["company"]["address"].is_null());
        Ok(())
    }

    #[tokio::test]
    async fn rename_and_move() -> anyhow::Result<()> {
        let db = get_db().await?;
        let id = resource::create::<Companies>(&db, movers()).await?;
        let view = resource::update::<Companies>(
            &db,
            id,
            UpdateCompany { name: Some("MOVERS UG".into()), address1: Some("Plot 2".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(view.name, "MOVERS UG");
        assert_eq!(view.address.map(|a| a.address_line_1).as_deref(), Some("Plot 2"));
        assert_eq!(view.tech_person.and_then(|p| p.email).as_deref(), Some("jane@movers.ug"));
        Ok(())
    }
}
