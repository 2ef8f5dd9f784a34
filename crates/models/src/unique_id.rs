//! Allocated type-approval identifiers and the company holding each one.
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "unique_id")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub value: String,
    pub occupant: Option<String>,
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
registry_entity!("Unique id", search: [Value, Occupant]);

pub async fn find_by_value<C: ConnectionTrait>(db: &C, value: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Value.eq(value)).one(db).await?)
}

pub async fn exists<C: ConnectionTrait>(db: &C, value: &str) -> Result<bool, ModelError> {
    Ok(find_by_value(db, value).await?.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, value: &str, occupant: Option<String>) -> Result<Model, ModelError> {
    errors::require("Unique id", value)?;
    let am = ActiveModel {
        value: Set(value.to_string()),
        occupant: Set(occupant),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
