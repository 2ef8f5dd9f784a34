use async_trait::async_trait;

use super::domain::{AuthUser, Credentials};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError>;
    /// Active users only.
    async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, first_name: &str, last_name: &str, email: &str, password_hash: &str) -> Result<AuthUser, AuthError>;
    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, (AuthUser, String)>>, // key: email
    }

    impl MockAuthRepository {
        fn users(&self) -> Result<MutexGuard<'_, HashMap<String, (AuthUser, String)>>, AuthError> {
            self.users.lock().map_err(|e| AuthError::Repository(e.to_string()))
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users()?.get(&email.to_lowercase()).map(|(u, _)| u.clone()))
        }

        async fn find_user_by_id(&self, id: i32) -> Result<Option<AuthUser>, AuthError> {
            Ok(self.users()?.values().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
        }

        async fn create_user(&self, first_name: &str, last_name: &str, email: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users()?;
            let email = email.to_lowercase();
            if users.contains_key(&email) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser {
                id: users.len() as i32 + 1,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.clone(),
            };
            users.insert(email, (user.clone(), password_hash.to_string()));
            Ok(user)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, AuthError> {
            Ok(self
                .users()?
                .values()
                .find(|(u, _)| u.id == user_id)
                .map(|(u, hash)| Credentials { user_id: u.id, password_hash: hash.clone() }))
        }
    }
}
