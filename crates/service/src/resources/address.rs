use async_trait::async_trait;
use models::address::{self, NewAddress};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use serde::{Deserialize, Serialize};

use super::patch;
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct Addresses;

#[derive(Debug, Serialize)]
pub struct AddressView {
    pub id: i32,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

impl From<address::Model> for AddressView {
    fn from(m: address::Model) -> Self {
        Self {
            id: m.id,
            district: m.district,
            postal_code: m.postal_code,
            country: m.country,
            address_line_1: m.address_line_1,
            address_line_2: m.address_line_2,
            date_created: m.date_created,
            date_modified: m.date_modified,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateAddress {
    #[serde(default, deserialize_with = "coerce::text")]
    pub address1: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address2: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAddress {
    #[serde(default, deserialize_with = "coerce::text")]
    pub address1: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub address2: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub district: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub postal: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub country: Option<String>,
}

#[async_trait]
impl RegistryResource for Addresses {
    type Entity = address::Entity;
    type View = AddressView;
    type Create = CreateAddress;
    type Update = UpdateAddress;

    const COLLECTION: &'static str = "addresses";
    const LABEL: &'static str = "Address";

    async fn present(_db: &DatabaseConnection, rows: Vec<address::Model>) -> Result<Vec<AddressView>, ServiceError> {
        Ok(rows.into_iter().map(AddressView::from).collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateAddress) -> Result<i32, ServiceError> {
        let line = body.address1.ok_or_else(|| ServiceError::missing("Address"))?;
        if address::exists(db, &line).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }
        let created = address::create(
            db,
            NewAddress {
                address_line_1: line,
                address_line_2: body.address2,
                district: body.district,
                postal_code: body.postal,
                country: body.country,
            },
        )
        .await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: address::Model, body: UpdateAddress) -> Result<address::Model, ServiceError> {
        if let Some(line) = body.address1.as_deref() {
            if line != current.address_line_1 && address::exists(db, line).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let mut am = current.into_active_model();
        patch!(am.address_line_1 = body.address1);
        patch!(am.address_line_2 = Some body.address2);
        patch!(am.district = Some body.district);
        patch!(am.postal_code = Some body.postal);
        patch!(am.country = Some body.country);
        Ok(am.update(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageRequest;
    use crate::resource;
    use crate::test_support::get_db;

    fn body(line: &str) -> CreateAddress {
        CreateAddress { address1: Some(line.into()), country: Some("Uganda".into()), ..Default::default() }
    }

    #[tokio::test]
    async fn create_rejects_blank_and_duplicate() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = resource::create::<Addresses>(&db, CreateAddress::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Address cannot be empty!");

        resource::create::<Addresses>(&db, body("Plot 4 Jinja Rd")).await?;
        let err = resource::create::<Addresses>(&db, body("Plot 4 Jinja Rd")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == "Address already exists!"));
        Ok(())
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() -> anyhow::Result<()> {
        let db = get_db().await?;
        let id = resource::create::<Addresses>(&db, body("Plot 4 Jinja Rd")).await?;
        let view = resource::update::<Addresses>(
            &db,
            id,
            UpdateAddress { district: Some("Kampala".into()), ..Default::default() },
        )
        .await?;
        assert_eq!(view.district.as_deref(), Some("Kampala"));
        assert_eq!(view.country.as_deref(), Some("Uganda"));
        assert_eq!(view.address_line_1, "Plot 4 Jinja Rd");
        Ok(())
    }

    #[tokio::test]
    async fn update_onto_existing_line_conflicts() -> anyhow::Result<()> {
        let db = get_db().await?;
        resource::create::<Addresses>(&db, body("A Street")).await?;
        let id = resource::create::<Addresses>(&db, body("B Street")).await?;
        let err = resource::update::<Addresses>(&db, id, UpdateAddress { address1: Some("A Street".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        Ok(())
    }

    #[test]
    fn update_body_rejects_unknown_keys() {
        let parsed: Result<UpdateAddress, _> = serde_json::from_str(r#"{"address1":"x","owner":"me"}"#);
        assert!(parsed.is_err());
    }

    #[tokio::test]
    async fn deleted_rows_leave_the_listing() -> anyhow::Result<()> {
        let db = get_db().await?;
        let keep = resource::create::<Addresses>(&db, body("Keep St")).await?;
        let gone = resource::create::<Addresses>(&db, body("Gone St")).await?;
        let msg = resource::delete::<Addresses>(&db, gone, false).await?;
        assert_eq!(msg, format!("Address with id {} successfully deleted.", gone));

        let page = resource::list::<Addresses>(&db, None, PageRequest { page: 1, per_page: 30 }).await?;
        assert_eq!(page.items.iter().map(|a| a.id).collect::<Vec<_>>(), vec![keep]);
        assert!(matches!(resource::get::<Addresses>(&db, gone).await, Err(ServiceError::NotFound(_))));

        let err = resource::list::<Addresses>(&db, Some("nowhere"), PageRequest { page: 1, per_page: 30 }).await.unwrap_err();
        assert_eq!(err.to_string(), "No addresses found");
        Ok(())
    }
}
