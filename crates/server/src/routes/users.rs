use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use common::{types::Message, API_PREFIX};
use service::auth::domain::AuthUser;
use service::pagination::PageRequest;
use service::users::{self, UserView};

use super::resources::{ListQuery, ListResponse};
use crate::auth::{require_token, ServerState};
use crate::errors::JsonApiError;

/// Active users newest first, or only the caller when `use_token` is sent.
pub async fn list(
    State(state): State<ServerState>,
    Extension(caller): Extension<AuthUser>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response, JsonApiError> {
    if headers.contains_key("use_token") {
        return Ok(Json(UserView::from(caller)).into_response());
    }
    let req = PageRequest::parse(query.limit.as_deref(), query.page.as_deref(), state.default_limit)?;
    let q = query.q.as_deref();
    let page = users::list(&state.db, q, req).await?;
    let links = page.links(&format!("{}/users", API_PREFIX), q);
    let body = ListResponse {
        page: page.page,
        per_page: page.per_page,
        total_data: page.total,
        pages: page.pages,
        data: page.items,
        links,
    };
    Ok(Json(body).into_response())
}

pub async fn fetch(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<UserView>, JsonApiError> {
    Ok(Json(users::get(&state.db, id).await?))
}

pub async fn remove(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Message>, JsonApiError> {
    let message = users::delete(&state.db, id).await?;
    Ok(Json(Message::new(message)))
}

pub fn routes(state: ServerState) -> Router<ServerState> {
    Router::new()
        .route("/", get(list))
        .route("/:id", get(fetch).delete(remove))
        .route_layer(from_fn_with_state(state, require_token))
}
