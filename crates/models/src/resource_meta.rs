//! Stored document references: inspection reports, outage reports and
//! type-approval certificates are kept as `location/name` pairs.
use std::collections::HashMap;

use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resource_meta")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub location: String,
    pub version: i32,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

impl Model {
    pub fn full_name(&self) -> String {
        if self.location.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.location, self.name)
        }
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
registry_entity!("Resource", search: [Name]);

/// Split a document URL into `(location, name)` at its last `/`.
pub fn split_url(url: &str) -> (String, String) {
    let url = url.trim().trim_end_matches('/');
    match url.rsplit_once('/') {
        Some((location, name)) => (location.to_string(), name.to_string()),
        None => (String::new(), url.to_string()),
    }
}

pub async fn find_by_url<C: ConnectionTrait>(db: &C, url: &str) -> Result<Option<Model>, ModelError> {
    let (location, name) = split_url(url);
    let found = Entity::find()
        .filter(Column::Location.eq(location))
        .filter(Column::Name.eq(name))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn exists<C: ConnectionTrait>(db: &C, url: &str) -> Result<bool, ModelError> {
    Ok(find_by_url(db, url).await?.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, url: &str) -> Result<Model, ModelError> {
    let (location, name) = split_url(url);
    errors::require("Resource name", &name)?;
    let am = ActiveModel {
        name: Set(name),
        location: Set(location),
        version: Set(1),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Full references keyed by id.
pub async fn full_names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, String>, ModelError> {
    let ids: Vec<i32> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find().filter(Column::Id.is_in(ids)).all(db).await?;
    Ok(rows.into_iter().map(|r| (r.id, r.full_name())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_url_takes_last_segment_as_name() {
        assert_eq!(
            split_url("https://files.example.org/reports/2023/q1.pdf"),
            ("https://files.example.org/reports/2023".to_string(), "q1.pdf".to_string())
        );
        assert_eq!(split_url("q1.pdf"), (String::new(), "q1.pdf".to_string()));
        assert_eq!(split_url("reports/q1.pdf/"), ("reports".to_string(), "q1.pdf".to_string()));
    }
}
