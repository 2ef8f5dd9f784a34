use sea_orm::{entity::prelude::*, Condition, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: Option<String>,
    pub last_name: String,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

impl Model {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), &self.last_name)
    }
}

pub fn full_name(first: Option<&str>, last: &str) -> String {
    match first.map(str::trim).filter(|f| !f.is_empty()) {
        Some(first) => format!("{} {}", first, last.trim()),
        None => last.trim().to_string(),
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

audited!();
registry_entity!("Person", search: [FirstName, LastName]);

/// Match on both name parts; an absent first name only matches NULL.
pub fn name_condition(first: Option<&str>, last: &str) -> Condition {
    let first = match first {
        Some(f) => Column::FirstName.eq(f),
        None => Column::FirstName.is_null(),
    };
    Condition::all().add(first).add(Column::LastName.eq(last))
}

pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    first: Option<&str>,
    last: &str,
) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(name_condition(first, last))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn exists<C: ConnectionTrait>(db: &C, first: Option<&str>, last: &str) -> Result<bool, ModelError> {
    Ok(find_by_name(db, first, last).await?.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, first: Option<String>, last: &str) -> Result<Model, ModelError> {
    errors::require("Last name", last)?;
    let am = ActiveModel {
        first_name: Set(first),
        last_name: Set(last.to_string()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Split "Jane Q Doe" into `(Some("Jane"), "Q Doe")`; a single word is a last name.
pub fn split_name(name: &str) -> (Option<String>, String) {
    let name = name.trim();
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (Some(first.to_string()), rest.trim().to_string()),
        None => (None, name.to_string()),
    }
}
