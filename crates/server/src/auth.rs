use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sea_orm::DatabaseConnection;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use tracing::warn;

use crate::errors::JsonApiError;

/// Header carrying the JWT issued at login.
pub const TOKEN_HEADER: &str = "x-access-token";

pub type Auth = AuthService<SeaOrmAuthRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<Auth>,
    /// Page size when a list request omits `limit`.
    pub default_limit: u64,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &configs::AppConfig) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
        let auth = Arc::new(AuthService::new(repo, AuthConfig::from(&cfg.auth)));
        Self { db, auth, default_limit: cfg.pagination.default_limit }
    }
}

/// Reject requests without a valid `x-access-token`; on success the caller is
/// stored in the request extensions as an `AuthUser`.
pub async fn require_token(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let Some(token) = token else {
        warn!(path = %req.uri().path(), "missing access token");
        return Err(JsonApiError::unauthorized("Token is missing"));
    };
    let user = state.auth.verify_token(&token).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
