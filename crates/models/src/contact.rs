use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tel_one: Option<String>,
    pub tel_two: Option<String>,
    pub email: Option<String>,
    pub social_media_handle: Option<String>,
    pub website: Option<String>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

audited!();
registry_entity!("Contact", search: [Email]);

#[derive(Clone, Debug, Default)]
pub struct NewContact {
    pub email: String,
    pub tel_one: Option<String>,
    pub tel_two: Option<String>,
    pub social_media_handle: Option<String>,
    pub website: Option<String>,
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::Email.eq(email))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn exists<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, ModelError> {
    Ok(find_by_email(db, email).await?.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewContact) -> Result<Model, ModelError> {
    errors::require("Email", &new.email)?;
    if !new.email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    let am = ActiveModel {
        email: Set(Some(new.email)),
        tel_one: Set(new.tel_one),
        tel_two: Set(new.tel_two),
        social_media_handle: Set(new.social_media_handle),
        website: Set(new.website),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
