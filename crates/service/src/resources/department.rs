use async_trait::async_trait;
use models::department::{self, NewDepartment};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel};
use serde::{Deserialize, Serialize};

use super::patch;
use crate::coerce;
use crate::errors::ServiceError;
use crate::resource::RegistryResource;

pub struct Departments;

#[derive(Debug, Serialize)]
pub struct DepartmentView {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub size: Option<i32>,
    pub permissions: Option<String>,
    pub date_created: DateTimeWithTimeZone,
    pub date_modified: DateTimeWithTimeZone,
}

impl From<department::Model> for DepartmentView {
    fn from(m: department::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            size: m.size,
            permissions: m.permissions,
            date_created: m.date_created,
            date_modified: m.date_modified,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateDepartment {
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub size: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub permissions: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateDepartment {
    #[serde(default, deserialize_with = "coerce::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::int")]
    pub size: Option<i32>,
    #[serde(default, deserialize_with = "coerce::text")]
    pub permissions: Option<String>,
}

#[async_trait]
impl RegistryResource for Departments {
    type Entity = department::Entity;
    type View = DepartmentView;
    type Create = CreateDepartment;
    type Update = UpdateDepartment;

    const COLLECTION: &'static str = "departments";
    const LABEL: &'static str = "Department";

    async fn present(_db: &DatabaseConnection, rows: Vec<department::Model>) -> Result<Vec<DepartmentView>, ServiceError> {
        Ok(rows.into_iter().map(DepartmentView::from).collect())
    }

    async fn create(db: &DatabaseConnection, body: CreateDepartment) -> Result<i32, ServiceError> {
        let name = body.name.ok_or_else(|| ServiceError::missing("Name"))?;
        if department::exists(db, &name).await? {
            return Err(ServiceError::Conflict(Self::conflict_message()));
        }
        let created = department::create(
            db,
            NewDepartment { name, description: body.description, size: body.size, permissions: body.permissions },
        )
        .await?;
        Ok(created.id)
    }

    async fn update(db: &DatabaseConnection, current: department::Model, body: UpdateDepartment) -> Result<department::Model, ServiceError> {
        if let Some(name) = body.name.as_deref() {
            if name != current.name && department::exists(db, name).await? {
                return Err(ServiceError::Conflict(Self::conflict_message()));
            }
        }
        if matches!(body.size, Some(s) if s < 0) {
            return Err(ServiceError::Validation("Department size cannot be negative!".into()));
        }
        let mut am = current.into_active_model();
        patch!(am.name = body.name);
        patch!(am.description = Some body.description);
        patch!(am.size = Some body.size);
        patch!(am.permissions = Some body.permissions);
        Ok(am.update(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn size_accepts_numeric_strings() -> anyhow::Result<()> {
        let db = get_db().await?;
        let body: CreateDepartment = serde_json::from_str(r#"{"name":" Licensing ","size":"12"}"#)?;
        let id = resource::create::<Departments>(&db, body).await?;
        let view = resource::get::<Departments>(&db, id).await?;
        assert_eq!(view["name"], "Licensing");
        assert_eq!(view["size"], 12);
        Ok(())
    }
}
