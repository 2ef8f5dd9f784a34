//! One [`RegistryResource`](crate::resource::RegistryResource) per collection
//! and the get-or-create chains they share.

use std::collections::{HashMap, HashSet};

use models::registry::Registry;
use models::{contact_person, resource_meta};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait};

use crate::errors::ServiceError;
use crate::repository::{self, find_or_create};

pub mod address;
pub mod company;
pub mod contact;
pub mod department;
pub mod employee;
pub mod numbering;
pub mod person;
pub mod postal;
pub mod spectrum;
pub mod telecom;
pub mod typeapproval;

pub use self::address::Addresses;
pub use self::company::Companies;
pub use self::contact::Contacts;
pub use self::department::Departments;
pub use self::employee::Employees;
pub use self::numbering::Numbering;
pub use self::person::People;
pub use self::postal::Postal;
pub use self::spectrum::Spectrum;
pub use self::telecom::Telecom;
pub use self::typeapproval::Typeapproval;

/// Person, contact and the link between them, each reused when an active row
/// with the same natural key exists.
pub(crate) async fn contact_person_for<C: ConnectionTrait>(
    db: &C,
    first_name: Option<String>,
    last_name: String,
    details: models::contact::NewContact,
) -> Result<contact_person::Model, ServiceError> {
    let (person, _) = find_or_create::<models::person::Entity, _, _, _>(
        db,
        models::person::name_condition(first_name.as_deref(), &last_name),
        || models::person::create(db, first_name.clone(), &last_name),
    )
    .await?;
    let email = details.email.clone();
    let (reachable, _) = find_or_create::<models::contact::Entity, _, _, _>(
        db,
        Condition::all().add(models::contact::Column::Email.eq(email)),
        || models::contact::create(db, details),
    )
    .await?;
    let (cp, _) = find_or_create::<contact_person::Entity, _, _, _>(
        db,
        Condition::all()
            .add(contact_person::Column::PersonId.eq(person.id))
            .add(contact_person::Column::ContactId.eq(reachable.id)),
        || contact_person::create(db, person.id, reachable.id),
    )
    .await?;
    Ok(cp)
}

/// Stored reference for a document URL.
pub(crate) async fn resource_for<C: ConnectionTrait>(db: &C, url: Option<&str>) -> Result<Option<i32>, ServiceError> {
    let Some(url) = url else { return Ok(None) };
    let (location, name) = resource_meta::split_url(url);
    let (r, _) = find_or_create::<resource_meta::Entity, _, _, _>(
        db,
        Condition::all()
            .add(resource_meta::Column::Location.eq(location))
            .add(resource_meta::Column::Name.eq(name)),
        || resource_meta::create(db, url),
    )
    .await?;
    Ok(Some(r.id))
}

pub(crate) async fn company_id<C: ConnectionTrait>(db: &C, id: Option<i32>) -> Result<Option<i32>, ServiceError> {
    let found = repository::resolve::<models::company::Entity, _>(db, id, models::company::Entity::NAME).await?;
    Ok(found.map(|c| c.id))
}

/// Applicant company for spectrum and type approval records.
pub(crate) async fn applicant_id<C: ConnectionTrait>(db: &C, id: Option<i32>) -> Result<Option<i32>, ServiceError> {
    match company_id(db, id).await {
        Ok(Some(found)) => Ok(Some(found)),
        Ok(None) | Err(ServiceError::Validation(_)) => {
            Err(ServiceError::Validation("Applicant needed to process data".into()))
        }
        Err(e) => Err(e),
    }
}

pub(crate) async fn employee_id<C: ConnectionTrait>(db: &C, id: Option<i32>) -> Result<Option<i32>, ServiceError> {
    let found = repository::resolve::<models::employee::Entity, _>(db, id, models::employee::Entity::NAME).await?;
    Ok(found.map(|e| e.id))
}

/// Display names for the companies, employees and documents referenced by a
/// batch of records, fetched with one query per kind.
#[derive(Debug, Default)]
pub(crate) struct Names {
    companies: HashMap<i32, String>,
    employees: HashMap<i32, String>,
    resources: HashMap<i32, String>,
}

impl Names {
    pub(crate) async fn load<C: ConnectionTrait>(
        db: &C,
        companies: impl IntoIterator<Item = Option<i32>>,
        employees: impl IntoIterator<Item = Option<i32>>,
        resources: impl IntoIterator<Item = Option<i32>>,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            companies: models::company::names(db, distinct(companies)).await?,
            employees: models::employee::full_names(db, distinct(employees)).await?,
            resources: resource_meta::full_names(db, distinct(resources)).await?,
        })
    }

    pub(crate) fn company(&self, id: Option<i32>) -> Option<String> {
        id.and_then(|id| self.companies.get(&id).cloned())
    }

    pub(crate) fn employee(&self, id: Option<i32>) -> Option<String> {
        id.and_then(|id| self.employees.get(&id).cloned())
    }

    pub(crate) fn resource(&self, id: Option<i32>) -> Option<String> {
        id.and_then(|id| self.resources.get(&id).cloned())
    }
}

fn distinct(ids: impl IntoIterator<Item = Option<i32>>) -> HashSet<i32> {
    ids.into_iter().flatten().collect()
}

/// `Some(v)` replaces the column, `None` keeps it.
macro_rules! patch {
    ($am:ident . $col:ident = Some $val:expr) => {
        if let Some(v) = $val {
            $am.$col = sea_orm::ActiveValue::Set(Some(v));
        }
    };
    ($am:ident . $col:ident = $val:expr) => {
        if let Some(v) = $val {
            $am.$col = sea_orm::ActiveValue::Set(v);
        }
    };
}

pub(crate) use patch;
