use std::collections::HashMap;

use sea_orm::sea_query::Query;
use sea_orm::{entity::prelude::*, Condition, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::registry::{audited, registry_entity, Registry};
use crate::{contact_person, department};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub contact_person_id: i32,
    pub department_id: Option<i32>,
    pub role: Option<String>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ContactPerson,
    Department,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ContactPerson => Entity::belongs_to(contact_person::Entity).from(Column::ContactPersonId).to(contact_person::Column::Id).into(),
            Relation::Department => Entity::belongs_to(department::Entity).from(Column::DepartmentId).to(department::Column::Id).into(),
        }
    }
}

impl Related<contact_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactPerson.def()
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

audited!();
registry_entity!("Employee", search: custom);

/// Employees are searched by the name of the person behind them.
fn search_condition(term: &str) -> Condition {
    Condition::all().add(Column::ContactPersonId.in_subquery(
        Query::select()
            .column(contact_person::Column::Id)
            .from(contact_person::Entity)
            .cond_where(contact_person::Entity::search(term))
            .to_owned(),
    ))
}

/// Every employee row counts here: `contact_person_id` is unique.
pub async fn exists<C: ConnectionTrait>(db: &C, contact_person_id: i32) -> Result<bool, ModelError> {
    let found = Entity::find()
        .filter(Column::ContactPersonId.eq(contact_person_id))
        .one(db)
        .await?;
    Ok(found.is_some())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    contact_person_id: i32,
    department_id: Option<i32>,
    role: Option<String>,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        contact_person_id: Set(contact_person_id),
        department_id: Set(department_id),
        role: Set(role),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Full names of the given employees keyed by employee id.
pub async fn full_names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, String>, ModelError> {
    let ids: Vec<i32> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = Entity::find().filter(Column::Id.is_in(ids)).all(db).await?;
    let names = contact_person::full_names(db, rows.iter().map(|e| e.contact_person_id)).await?;
    Ok(rows
        .into_iter()
        .filter_map(|e| names.get(&e.contact_person_id).map(|n| (e.id, n.clone())))
        .collect())
}
