use async_trait::async_trait;
use models::contact::{self, NewContact};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use serde::{Deserialize, Serialize};

use super::patch;
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct Contacts;

#[derive(Debug, Serialize)]
pub struct ContactView {
    pub id: i32,
    pub email: Option<String>,
    pub social_media: Option<String>,
    pub website: Option<String>,
    pub tel_one: Option<String>,
    pub tel_two: Option<String>,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

impl From<contact::Model> for ContactView {
    fn from(m: contact::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            social_media: m.social_media_handle,
            website: m.website,
            tel_one: m.tel_one,
            tel_two: m.tel_two,
            date_created: m.date_created,
            date_modified: m.date_modified,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContact {
    #[serde(default, deserialize_with = "coerce::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tel_one: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tel_two: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub social_media_handle: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateContact {
    #[serde(default, deserialize_with = "coerce::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tel_one: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tel_two: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub social_media_handle: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub website: Option<String>,
}

#[async_trait]
impl RegistryResource for Contacts {
    type Entity = contact::Entity;
    type View = ContactView;
    type Create = CreateContact;
    type Update = UpdateContact;

    const COLLECTION: &'static str = "contacts";
    const LABEL: &'static str = "Contact";

    async fn present(_db: &DatabaseConnection, rows: Vec<contact::Model>) -> Result<Vec<ContactView>, ServiceError> {
        Ok(rows.into_iter().map(ContactView::from).collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateContact) -> Result<i32, ServiceError> {
        let email = body.email.ok_or_else(|| ServiceError::missing("Contact"))?;
        if contact::exists(db, &email).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }
        let created = contact::create(
            db,
            NewContact {
                email,
                tel_one: body.tel_one,
                tel_two: body.tel_two,
                social_media_handle: body.social_media_handle,
                website: body.website,
            },
        )
        .await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: contact::Model, body: UpdateContact) -> Result<contact::Model, ServiceError> {
        if let Some(email) = body.email.as_deref() {
            if !email.contains('@') {
                return Err(ServiceError::Validation("invalid email".into()));
            }
            if Some(email) != current.email.as_deref() && contact::exists(db, email).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        let mut am = current.into_active_model();
        patch!(am.email = Some body.email);
        patch!(am.tel_one = Some body.tel_one);
        patch!(am.tel_two = Some body.tel_two);
        patch!(am.social_media_handle = Some body.social_media_handle);
        patch!(am.website = Some body.website);
        Ok(am.update(db).await?)
    }
}
