use models::user;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::auth::domain::{AuthUser, Credentials};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl From<user::Model> for AuthUser {
    fn from(u: user::Model) -> Self {
        AuthUser { id: u.id, first_name: u.first_name, last_name: u.last_name, email: u.email }
    }
}

fn repo_err(e: impl ToString) -> AuthError {
    AuthError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
        let res = user::find_by_email(&self.db, &email.to_lowercase()).await.map_err(repo_err)?;
        Ok(res.map(AuthUser::from))
    }

    async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
        let res = user::Entity::find_by_id(id)
            .filter(user::Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(res.map(AuthUser::from))
    }

    async fn create_user(&self, first_name: &str, last_name: &str, email: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
        let created = user::create(&self.db, first_name, last_name, email, password_hash)
            .await
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(created.into())
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
        let res = user::Entity::find_by_id(user_id).one(&self.db).await.map_err(repo_err)?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.password_hash }))
    }
}
