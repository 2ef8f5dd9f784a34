use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = configs::AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    cfg.auth.secret = "test-secret".into();

    let app = server::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn token(app: &TestApp) -> anyhow::Result<String> {
    let c = client();
    let res = c
        .post(app.url("/auth/register"))
        .json(&json!({"first_name": "Test", "last_name": "User", "email": "tester@example.com", "password": "S3curePass!"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let res = c
        .post(app.url("/auth/login"))
        .json(&json!({"email": "tester@example.com", "password": "S3curePass!"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_company_create_then_conflict() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let body = json!({
        "name": "MOVERS",
        "address1": "Plot 4 Jinja Rd",
        "country": "Uganda",
        "techPersonName": "Jane Tech",
        "techPersonEmail": "jane@movers.ug"
    });

    let res = c.post(app.url("/companies")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?;
    assert_eq!(created["message"], "Company created successfully!");
    let id = created["id"].as_i64().unwrap_or_default();

    let res = c.post(app.url("/companies")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    assert_eq!(res.json::<Value>().await?["message"], "Company already exists!");

    let res = c.get(app.url(&format!("/companies/{}", id))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let profile = res.json::<Value>().await?;
    assert_eq!(profile["company"]["address"]["address_line_1"], "Plot 4 Jinja Rd");
    assert_eq!(profile["typeapproval"], json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_body_is_parsed_without_content_type() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client()
        .post(app.url("/departments"))
        .body(r#"{"name": "Licensing", "size": "12"}"#)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = client().post(app.url("/departments")).body("{}").send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Name cannot be empty!");
    Ok(())
}

#[tokio::test]
async fn e2e_list_envelope_and_limits() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    for line in ["Plot 1", "Plot 2", "Plot 3"] {
        let res = c.post(app.url("/addresses")).json(&json!({"address1": line})).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c.get(app.url("/addresses?limit=1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["data"][0]["address_line_1"], "Plot 3");
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 1);
    assert_eq!(body["total_data"], 3);
    assert_eq!(body["pages"], 3);
    assert_eq!(body["prev_page"], "/api/v1/addresses?limit=1");
    assert_eq!(body["next_page"], "/api/v1/addresses?limit=1&page=2");

    let res = c.get(app.url("/addresses?limit=500")).send().await?;
    assert_eq!(res.json::<Value>().await?["per_page"], 100);

    for bad in ["limit=0", "page=0", "limit=abc", "page=-2"] {
        let res = c.get(app.url(&format!("/addresses?{}", bad))).send().await?;
        assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST, "query {}", bad);
    }

    let res = c.get(app.url("/addresses?limit=2&page=9")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.get(app.url("/addresses?q=plot%202")).send().await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["total_data"], 1);
    assert_eq!(body["prev_page"], "/api/v1/addresses?limit=30&q=plot+2");
    Ok(())
}

#[tokio::test]
async fn e2e_empty_collection_is_not_found() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/people")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "No people found");
    Ok(())
}

#[tokio::test]
async fn e2e_delete_requires_token_and_hides_row() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let res = c.post(app.url("/contacts")).json(&json!({"email": "desk@ucc.go.ug"})).send().await?;
    let id = res.json::<Value>().await?["id"].as_i64().unwrap_or_default();

    let res = c.delete(app.url(&format!("/contacts/{}", id))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let res = c
        .delete(app.url(&format!("/contacts/{}", id)))
        .header("x-access-token", "not-a-jwt")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let token = token(&app).await?;
    let res = c
        .delete(app.url(&format!("/contacts/{}", id)))
        .header("x-access-token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], format!("Contact with id {} successfully deleted.", id));

    let res = c.get(app.url(&format!("/contacts/{}", id))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    // the soft-deleted row is still there for a deep delete
    let res = c
        .delete(app.url(&format!("/contacts/{}?deep=true", id)))
        .header("x-access-token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c
        .delete(app.url(&format!("/contacts/{}?deep=true", id)))
        .header("x-access-token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_update_whitelist() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let res = c.post(app.url("/people")).json(&json!({"firstName": "Ada", "lastName": "Byron"})).send().await?;
    let id = res.json::<Value>().await?["id"].as_i64().unwrap_or_default();

    let res = c.patch(app.url(&format!("/people/{}", id))).json(&json!({"lastName": "Lovelace"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["full_name"], "Ada Lovelace");

    let res = c.put(app.url(&format!("/people/{}", id))).json(&json!({"active": false})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.put(app.url("/people/9999")).json(&json!({"lastName": "X"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_users_need_token() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();
    let res = c.get(app.url("/users")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);

    let token = token(&app).await?;
    let res = c.get(app.url("/users")).header("x-access-token", &token).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"][0]["email"], "tester@example.com");
    assert!(body["data"][0].get("password_hash").is_none());

    let res = c
        .get(app.url("/users"))
        .header("x-access-token", &token)
        .header("use_token", "1")
        .send()
        .await?;
    assert_eq!(res.json::<Value>().await?["first_name"], "Test");
    Ok(())
}
