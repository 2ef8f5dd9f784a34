use models::errors::ModelError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("{0}")]
    Model(#[from] ModelError),
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        ServiceError::Db(e.to_string())
    }
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn missing(field: &str) -> Self {
        Self::Validation(format!("{} cannot be empty!", field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_caller_facing() {
        assert_eq!(ServiceError::missing("Company name").to_string(), "Company name cannot be empty!");
        assert_eq!(ServiceError::not_found("Address").to_string(), "Address not found");
        let m: ServiceError = ModelError::Validation("invalid email".into()).into();
        assert_eq!(m.to_string(), "invalid email");
    }
}
