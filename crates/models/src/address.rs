use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "address")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub address_line_1: String,
    pub address_line_2: Option<String>,
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
registry_entity!("Address", search: [AddressLine1]);

#[derive(Clone, Debug, Default)]
pub struct NewAddress {
    pub address_line_1: String,
    pub address_line_2: Option<String>,
    pub district: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Natural-key lookup among active rows.
pub async fn find_by_line<C: ConnectionTrait>(db: &C, line: &str) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::AddressLine1.eq(line))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn exists<C: ConnectionTrait>(db: &C, line: &str) -> Result<bool, ModelError> {
    Ok(find_by_line(db, line).await?.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewAddress) -> Result<Model, ModelError> {
    errors::require("Address", &new.address_line_1)?;
    let am = ActiveModel {
        address_line_1: Set(new.address_line_1),
        address_line_2: Set(new.address_line_2),
        district: Set(new.district),
        postal_code: Set(new.postal_code),
        country: Set(new.country),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
