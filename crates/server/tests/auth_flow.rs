use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

async fn build_app() -> anyhow::Result<Router> {
    let mut cfg = configs::AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    Ok(server::build_app(&cfg).await?)
}

fn post(uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

async fn json_body(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let register = json!({"first_name": "Grace", "last_name": "Hopper", "email": "Grace@Navy.mil", "password": "S3curePass!"});

    let resp = app.call(post("/api/v1/auth/register", register.clone())?).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await?;
    assert_eq!(body["user"]["email"], "grace@navy.mil");

    let resp = app.call(post("/api/v1/auth/register", register)?).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app
        .call(post("/api/v1/auth/login", json!({"email": "grace@navy.mil", "password": "S3curePass!"}))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let token = json_body(resp).await?["token"].as_str().unwrap_or_default().to_string();
    assert!(!token.is_empty());

    let req = Request::builder()
        .uri("/api/v1/users")
        .header("x-access-token", &token)
        .header("use_token", "yes")
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await?["last_name"], "Hopper");
    Ok(())
}

#[tokio::test]
async fn test_bad_credentials_and_input() -> anyhow::Result<()> {
    let mut app = build_app().await?;
    let resp = app
        .call(post("/api/v1/auth/register", json!({"first_name": "A", "last_name": "B", "email": "not-an-email", "password": "longenough"}))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .call(post("/api/v1/auth/register", json!({"first_name": "A", "last_name": "B", "email": "a@b.io", "password": "short"}))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app
        .call(post("/api/v1/auth/login", json!({"email": "nobody@b.io", "password": "whatever1"}))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(resp).await?["message"], "Invalid email or password");
    Ok(())
}
