use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Stored password hash for a user
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: i32,
    pub password_hash: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

/// JWT claims carried by `x-access-token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub exp: usize,
}
