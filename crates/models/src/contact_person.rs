//! Links a person to their contact details. Companies reference these for
//! their legal and technical contacts and every employee owns one.
use sea_orm::sea_query::Query;
use sea_orm::{entity::prelude::*, Condition, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::registry::{audited, registry_entity, Registry};
use crate::{contact, person};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_person")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub person_id: i32,
    pub contact_id: i32,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Person,
    Contact,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Person => Entity::belongs_to(person::Entity).from(Column::PersonId).to(person::Column::Id).into(),
            Relation::Contact => Entity::belongs_to(contact::Entity).from(Column::ContactId).to(contact::Column::Id).into(),
        }
    }
}

impl Related<person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<contact::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contact.def()
    }
}

audited!();
registry_entity!("Contact person", search: custom);

/// Contact persons whose person's name matches `term`.
fn search_condition(term: &str) -> Condition {
    Condition::all().add(Column::PersonId.in_subquery(
        Query::select()
            .column(person::Column::Id)
            .from(person::Entity)
            .cond_where(person::Entity::search(term))
            .to_owned(),
    ))
}

pub async fn find_by_pair<C: ConnectionTrait>(db: &C, person_id: i32, contact_id: i32) -> Result<Option<Model>, ModelError> {
    let found = Entity::find()
        .filter(Column::PersonId.eq(person_id))
        .filter(Column::ContactId.eq(contact_id))
        .filter(Column::Active.eq(true))
        .one(db)
        .await?;
    Ok(found)
}

pub async fn exists<C: ConnectionTrait>(db: &C, person_id: i32, contact_id: i32) -> Result<bool, ModelError> {
    Ok(find_by_pair(db, person_id, contact_id).await?.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, person_id: i32, contact_id: i32) -> Result<Model, ModelError> {
    let am = ActiveModel {
        person_id: Set(person_id),
        contact_id: Set(contact_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Full names keyed by contact person id, for presenting rows that reference
/// contact persons without one query per row.
pub async fn full_names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<std::collections::HashMap<i32, String>, ModelError> {
    let ids: Vec<i32> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(Default::default());
    }
    let rows = Entity::find()
        .filter(Column::Id.is_in(ids))
        .find_also_related(person::Entity)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .filter_map(|(cp, p)| p.map(|p| (cp.id, p.full_name())))
        .collect())
}
