use async_trait::async_trait;
use models::person;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use serde::{Deserialize, Serialize};

use super::patch;
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct People;

#[derive(Debug, Serialize)]
pub struct PersonView {
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: String,
    pub full_name: String,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

impl From<person::Model> for PersonView {
    fn from(m: person::Model) -> Self {
        let full_name = m.full_name();
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            full_name,
            date_created: m.date_created,
            date_modified: m.date_modified,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePerson {
    #[serde(default, deserialize_with = "coerce::text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub last_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdatePerson {
    #[serde(default, deserialize_with = "coerce::text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub last_name: Option<String>,
}

#[async_trait]
impl RegistryResource for People {
    type Entity = person::Entity;
    type View = PersonView;
    type Create = CreatePerson;
    type Update = UpdatePerson;

    const COLLECTION: &'static str = "people";
    const LABEL: &'static str = "Person";

    async fn present(_db: &DatabaseConnection, rows: Vec<person::Model>) -> Result<Vec<PersonView>, ServiceError> {
        Ok(rows.into_iter().map(PersonView::from).collect())
    }

    async fn create(db: &DatabaseConnection, body: CreatePerson) -> Result<i32, ServiceError> {
        let last = body.last_name.ok_or_else(|| ServiceError::missing("Last Name"))?;
        if person::exists(db, body.first_name.as_deref(), &last).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }
        Ok(person::create(db, body.first_name, &last).await?.id)
    }

    async fn update(db: &DatabaseConnection, current: person::Model, body: UpdatePerson) -> Result<person::Model, ServiceError> {
        let first = body.first_name.clone().or_else(|| current.first_name.clone());
        let last = body.last_name.clone().unwrap_or_else(|| current.last_name.clone());
        if (first != current.first_name || last != current.last_name) && person::exists(db, first.as_deref(), &last).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }
        let mut am = current.into_active_model();
        patch!(am.first_name = Some body.first_name);
        patch!(am.last_name = body.last_name);
        Ok(am.update(db).await?)
    }
}
