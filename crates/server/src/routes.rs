use axum::{routing::get, Json, Router};
use common::{types::Health, API_PREFIX};
use service::resources::{
    Addresses, Companies, Contacts, Departments, Employees, Numbering, People, Postal, Spectrum, Telecom, Typeapproval,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::auth::ServerState;

pub mod auth;
pub mod resources;
pub mod users;

use self::resources::resource_routes;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Every collection under `/api/v1`, plus auth and users.
fn api_routes(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .nest("/companies", resource_routes::<Companies>(state.clone()))
        .nest("/addresses", resource_routes::<Addresses>(state.clone()))
        .nest("/people", resource_routes::<People>(state.clone()))
        .nest("/contacts", resource_routes::<Contacts>(state.clone()))
        .nest("/departments", resource_routes::<Departments>(state.clone()))
        .nest("/employees", resource_routes::<Employees>(state.clone()))
        .nest("/numbering", resource_routes::<Numbering>(state.clone()))
        .nest("/postal", resource_routes::<Postal>(state.clone()))
        .nest("/spectrum", resource_routes::<Spectrum>(state.clone()))
        .nest("/telecom", resource_routes::<Telecom>(state.clone()))
        .nest("/typeapproval", resource_routes::<Typeapproval>(state.clone()))
        .nest("/auth", auth::routes())
        .nest("/users", users::routes(state.clone()))
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(API_PREFIX, api_routes(&state))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
