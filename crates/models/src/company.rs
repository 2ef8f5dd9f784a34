use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors::{self, ModelError};
use crate::registry::{audited, registry_entity};
use crate::{address, contact_person};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub address_id: Option<i32>,
    pub legal_person_id: Option<i32>,
    pub tech_person_id: Option<i32>,
    pub active: bool,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Address,
    LegalPerson,
    TechPerson,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Address => Entity::belongs_to(address::Entity).from(Column::AddressId).to(address::Column::Id).into(),
            Relation::LegalPerson => Entity::belongs_to(contact_person::Entity).from(Column::LegalPersonId).to(contact_person::Column::Id).into(),
            Relation::TechPerson => Entity::belongs_to(contact_person::Entity).from(Column::TechPersonId).to(contact_person::Column::Id).into(),
        }
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

audited!();
registry_entity!("Company", search: [Name]);

#[derive(Clone, Debug, Default)]
pub struct NewCompany {
    pub name: String,
    pub address_id: Option<i32>,
    pub legal_person_id: Option<i32>,
    pub tech_person_id: Option<i32>,
}

/// Company names are unique across every row, deleted or not.
pub async fn exists<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, ModelError> {
    let found = Entity::find().filter(Column::Name.eq(name)).one(db).await?;
    Ok(found.is_some())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewCompany) -> Result<Model, ModelError> {
    errors::require("Company name", &new.name)?;
    let am = ActiveModel {
        name: Set(new.name),
        address_id: Set(new.address_id),
        legal_person_id: Set(new.legal_person_id),
        tech_person_id: Set(new.tech_person_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Names keyed by id, inactive companies included.
pub async fn names<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<std::collections::HashMap<i32, String>, ModelError> {
    let ids: Vec<i32> = ids.into_iter().collect();
    if ids.is_empty() {
        return Ok(Default::default());
    }
    let rows = Entity::find().filter(Column::Id.is_in(ids)).all(db).await?;
    Ok(rows.into_iter().map(|c| (c.id, c.name)).collect())
}
