use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
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
registry_entity!("User", search: [FirstName, LastName, Email]);

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

pub async fn exists<C: ConnectionTrait>(db: &C, email: &str) -> Result<bool, ModelError> {
    Ok(find_by_email(db, email).await?.is_some())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
) -> Result<Model, ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    errors::require("First name", first_name)?;
    errors::require("Last name", last_name)?;
    if first_name.chars().count() > 25 || last_name.chars().count() > 35 {
        return Err(ModelError::Validation("name too long".into()));
    }
    let am = ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        email: Set(email.to_lowercase()),
        password_hash: Set(password_hash.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
