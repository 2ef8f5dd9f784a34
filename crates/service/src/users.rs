//! Read and remove registered users. Accounts are created through
//! [`crate::auth::AuthService::register`].

use models::user;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, instrument};

use crate::auth::domain::AuthUser;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::repository;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<user::Model> for UserView {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, first_name: u.first_name, last_name: u.last_name, email: u.email }
    }
}

impl From<AuthUser> for UserView {
    fn from(u: AuthUser) -> Self {
        Self { id: u.id, first_name: u.first_name, last_name: u.last_name, email: u.email }
    }
}

pub async fn list(db: &DatabaseConnection, q: Option<&str>, req: PageRequest) -> Result<Page<UserView>, ServiceError> {
    let page = repository::list_active::<user::Entity, _>(db, q, req).await?;
    if page.items.is_empty() {
        return Err(ServiceError::NotFound("Users not found".into()));
    }
    Ok(page.map(UserView::from))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<UserView, ServiceError> {
    repository::get_active::<user::Entity, _>(db, id)
        .await
        .map(UserView::from)
        .map_err(|e| match e {
            ServiceError::NotFound(_) => ServiceError::NotFound(format!("User with ID {} not found.", id)),
            other => other,
        })
}

#[instrument(skip(db))]
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<String, ServiceError> {
    if !models::registry::soft_delete::<user::Entity, _>(db, id).await? {
        return Err(ServiceError::NotFound(format!("User with ID {} not found", id)));
    }
    info!(id, "user deactivated");
    Ok(format!("User with ID {} successfully deleted", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn soft_deleted_user_disappears() -> anyhow::Result<()> {
        let db = get_db().await?;
        let u = user::create(&db, "Alan", "Turing", "Alan@Bletchley.uk", "hash").await?;
        let other = user::create(&db, "Joan", "Clarke", "joan@bletchley.uk", "hash").await?;

        let req = PageRequest::parse(None, None, 30)?;
        let page = list(&db, None, req).await?;
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].id, other.id);

        assert_eq!(get(&db, u.id).await?.email, "alan@bletchley.uk");
        assert_eq!(delete(&db, u.id).await?, format!("User with ID {} successfully deleted", u.id));
        assert!(matches!(get(&db, u.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete(&db, 999).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
