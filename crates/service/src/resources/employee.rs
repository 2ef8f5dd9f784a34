use std::collections::HashMap;

use async_trait::async_trait;
use models::{contact, contact_person, department, employee, person};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use super::{contact_person_for, patch};
use crate::coerce;
use crate::errors::ServiceError;
use crate::repository;
use crate::resource::RegistryResource;

pub struct Employees;

#[derive(Debug, Serialize)]
pub struct EmployeeView {
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub permissions: Option<String>,
    pub role: Option<String>,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[serde(default, deserialize_with = "coerce::text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tel_one: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub tel_two: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub department: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateEmployee {
    #[serde(default, deserialize_with = "coerce::int")]
    pub department: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub role: Option<String>,
}

#[async_trait]
impl RegistryResource for Employees {
    type Entity = employee::Entity;
    type View = EmployeeView;
    type Create = CreateEmployee;
    type Update = UpdateEmployee;

    const COLLECTION: &'static str = "employees";
    const LABEL: &'static str = "Employee";

    async fn present(db: &DatabaseConnection, rows: Vec<employee::Model>) -> Result<Vec<EmployeeView>, ServiceError> {
        let links: HashMap<i32, contact_person::Model> = contact_person::Entity::find()
            .filter(contact_person::Column::Id.is_in(rows.iter().map(|e| e.contact_person_id)))
            .all(db)
            .await?
            .into_iter()
            .map(|cp| (cp.id, cp))
            .collect();
        let people: HashMap<i32, String> = person::Entity::find()
            .filter(person::Column::Id.is_in(links.values().map(|cp| cp.person_id)))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.full_name()))
            .collect();
        let emails: HashMap<i32, Option<String>> = contact::Entity::find()
            .filter(contact::Column::Id.is_in(links.values().map(|cp| cp.contact_id)))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.email))
            .collect();
        let departments: HashMap<i32, department::Model> = department::Entity::find()
            .filter(department::Column::Id.is_in(rows.iter().filter_map(|e| e.department_id)))
            .all(db)
            .await?
            .into_iter()
            .map(|d| (d.id, d))
            .collect();

        Ok(rows
            .into_iter()
            .map(|e| {
                let link = links.get(&e.contact_person_id);
                let dept = e.department_id.and_then(|id| departments.get(&id));
                EmployeeView {
                    id: e.id,
                    name: link.and_then(|cp| people.get(&cp.person_id).cloned()),
                    email: link.and_then(|cp| emails.get(&cp.contact_id).cloned().flatten()),
                    department: dept.map(|d| d.name.clone()),
                    permissions: dept.and_then(|d| d.permissions.clone()),
                    role: e.role,
                    date_created: e.date_created,
                    date_modified: e.date_modified,
                }
            })
            .collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateEmployee) -> Result<i32, ServiceError> {
        let last = body.last_name.ok_or_else(|| ServiceError::missing("Name"))?;
        let email = body.email.ok_or_else(|| ServiceError::missing("Email"))?;

        let txn = db.begin().await?;
        let department_id = repository::resolve::<department::Entity, _>(&txn, body.department, "Department")
            .await?
            .map(|d| d.id);
        let details = contact::NewContact { email, tel_one: body.tel_one, tel_two: body.tel_two, ..Default::default() };
        let cp = contact_person_for(&txn, body.first_name, last, details).await?;
        if employee::exists(&txn, cp.id).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }
        let created = employee::create(&txn, cp.id, department_id, body.role).await?;
        txn.commit().await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: employee::Model, body: UpdateEmployee) -> Result<employee::Model, ServiceError> {
        let department_id = repository::resolve::<department::Entity, _>(db, body.department, "Department")
            .await?
            .map(|d| d.id);
        let mut am = current.into_active_model();
        patch!(am.department_id = Some department_id);
        patch!(am.role = Some body.role);
        Ok(am.update(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageRequest;
    use crate::resource;
    use crate::resources::department::{CreateDepartment, Departments};
    use crate::test_support::get_db;
    use sea_orm::PaginatorTrait;

    fn grace(department: Option<i32>) -> CreateEmployee {
        CreateEmployee {
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            email: Some("grace@regulator.go".into()),
            department,
            role: Some("Inspector".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_resolves_person_contact_and_department() -> anyhow::Result<()> {
        let db = get_db().await?;
        let dept = resource::create::<Departments>(
            &db,
            CreateDepartment { name: Some("Licensing".into()), permissions: Some("rw".into()), ..Default::default() },
        )
        .await?;
        let id = resource::create::<Employees>(&db, grace(Some(dept))).await?;

        let view = resource::get::<Employees>(&db, id).await?;
        assert_eq!(view["name"], "Grace Hopper");
        assert_eq!(view["email"], "grace@regulator.go");
        assert_eq!(view["department"], "Licensing");
        assert_eq!(view["permissions"], "rw");
        Ok(())
    }

    #[tokio::test]
    async fn same_person_twice_conflicts_without_leftovers() -> anyhow::Result<()> {
        let db = get_db().await?;
        resource::create::<Employees>(&db, grace(None)).await?;
        let err = resource::create::<Employees>(&db, grace(None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Employee already exists!");
        assert_eq!(person::Entity::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_department_is_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        let err = resource::create::<Employees>(&db, grace(Some(99))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(person::Entity::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn search_matches_person_names() -> anyhow::Result<()> {
        let db = get_db().await?;
        resource::create::<Employees>(&db, grace(None)).await?;
        let page = resource::list::<Employees>(&db, Some("hop"), PageRequest { page: 1, per_page: 10 }).await?;
        assert_eq!(page.total, 1);
        assert!(resource::list::<Employees>(&db, Some("turing"), PageRequest { page: 1, per_page: 10 }).await.is_err());
        Ok(())
    }
}
