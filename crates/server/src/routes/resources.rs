//! Handlers shared by every registry collection, instantiated once per
//! [`RegistryResource`].

use axum::extract::{Path, Query, State};
use axum::handler::Handler;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use common::{types::Message, API_PREFIX};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use service::pagination::{PageLinks, PageRequest};
use service::{resource, RegistryResource};

use crate::auth::{require_token, ServerState};
use crate::errors::JsonApiError;
use crate::extract::JsonBody;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    pub deep: Option<String>,
}

impl DeleteQuery {
    fn is_deep(&self) -> bool {
        matches!(self.deep.as_deref().map(str::to_lowercase).as_deref(), Some("true" | "1" | "yes"))
    }
}

/// List envelope with the page links flattened alongside the counters.
#[derive(Debug, Serialize)]
pub struct ListResponse<V> {
    pub data: Vec<V>,
    pub page: u64,
    pub per_page: u64,
    pub total_data: u64,
    pub pages: u64,
    #[serde(flatten)]
    pub links: PageLinks,
}

pub async fn list<R: RegistryResource>(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<R::View>>, JsonApiError> {
    let req = PageRequest::parse(query.limit.as_deref(), query.page.as_deref(), state.default_limit)?;
    let q = query.q.as_deref();
    let page = resource::list::<R>(&state.db, q, req).await?;
    let links = page.links(&format!("{}/{}", API_PREFIX, R::COLLECTION), q);
    Ok(Json(ListResponse {
        page: page.page,
        per_page: page.per_page,
        total_data: page.total,
        pages: page.pages,
        data: page.items,
        links,
    }))
}

pub async fn create<R: RegistryResource>(
    State(state): State<ServerState>,
    JsonBody(body): JsonBody<R::Create>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    let id = resource::create::<R>(&state.db, body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": R::created_message(), "id": id }))))
}

pub async fn fetch<R: RegistryResource>(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, JsonApiError> {
    Ok(Json(resource::get::<R>(&state.db, id).await?))
}

pub async fn update<R: RegistryResource>(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<R::Update>,
) -> Result<Json<R::View>, JsonApiError> {
    Ok(Json(resource::update::<R>(&state.db, id, body).await?))
}

pub async fn remove<R: RegistryResource>(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Message>, JsonApiError> {
    let message = resource::delete::<R>(&state.db, id, query.is_deep()).await?;
    Ok(Json(Message::new(message)))
}

/// `/` and `/:id` for one collection. Only DELETE needs a token.
pub fn resource_routes<R: RegistryResource>(state: ServerState) -> Router<ServerState> {
    let guarded_remove = remove::<R>.layer(from_fn_with_state(state, require_token));
    Router::new().route("/", get(list::<R>).post(create::<R>)).route(
        "/:id",
        get(fetch::<R>).put(update::<R>).patch(update::<R>).delete(guarded_remove),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_flag_parsing() {
        let q = |v: Option<&str>| DeleteQuery { deep: v.map(str::to_string) };
        assert!(q(Some("true")).is_deep());
        assert!(q(Some("TRUE")).is_deep());
        assert!(q(Some("1")).is_deep());
        assert!(!q(Some("false")).is_deep());
        assert!(!q(None).is_deep());
    }
}
