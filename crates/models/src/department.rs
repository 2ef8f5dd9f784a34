use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub size: Option<i32>,
    pub permissions: Option<String>,
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
registry_entity!("Department", search: [Name]);

#[derive(Clone, Debug, Default)]
pub struct NewDepartment {
    pub name: String,
    pub description: Option<String>,
    pub size: Option<i32>,
    pub permissions: Option<String>,
}

pub async fn exists<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, ModelError> {
    let found = Entity::find()
        .filter(Column::Name.eq(name))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewDepartment) -> Result<Model, ModelError> {
    errors::require("Department name", &new.name)?;
    if matches!(new.size, Some(s) if s < 0) {
        return Err(ModelError::Validation("Department size cannot be negative!".into()));
    }
    let am = ActiveModel {
        name: Set(new.name),
        description: Set(new.description),
        size: Set(new.size),
        permissions: Set(new.permissions),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
