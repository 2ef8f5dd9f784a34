use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use service::auth::domain::{LoginInput, RegisterInput};
use service::users::UserView;
use tracing::info;

use crate::auth::ServerState;
use crate::errors::JsonApiError;
use crate::extract::JsonBody;

#[derive(Serialize)]
pub struct RegisterOutput {
    pub message: String,
    pub user: UserView,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub message: String,
    pub token: String,
}

pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<RegisterOutput>), JsonApiError> {
    let user = state.auth.register(input).await?;
    info!(user_id = user.id, "registered");
    let out = RegisterOutput { message: "User registered successfully!".into(), user: user.into() };
    Ok((StatusCode::CREATED, Json(out)))
}

pub async fn login(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<LoginOutput>, JsonApiError> {
    let session = state.auth.login(input).await?;
    Ok(Json(LoginOutput { message: "Login successful!".into(), token: session.token }))
}

pub fn routes() -> Router<ServerState> {
    Router::new().route("/register", post(register)).route("/login", post(login))
}
