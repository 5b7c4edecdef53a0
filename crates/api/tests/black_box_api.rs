use std::sync::Arc;

use crm_api::app::{self, AppServices};
use crm_auth::Credentials;
use reqwest::StatusCode;
use serde_json::json;

const USERNAME: &str = "admin";
const PASSWORD: &str = "secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let services = Arc::new(AppServices::connected(Credentials::new(USERNAME, PASSWORD)).await);
        let app = app::build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn create_then_list_scenario() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users", srv.base_url))
        .json(&json!({ "email": "a@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["status"], "ok");
    assert_eq!(created["data"]["user"]["email"], "a@x.com");
    let id = created["data"]["user"]["id"].as_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&id).is_ok());

    let res = client
        .get(format!("{}/users", srv.base_url))
        .basic_auth(USERNAME, Some(PASSWORD))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let listed: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        listed,
        json!({"status": "ok", "data": {"users": [{"email": "a@x.com", "id": id}]}})
    );

    let res = client
        .get(format!("{}/user", srv.base_url))
        .query(&[("id", id.as_str())])
        .basic_auth(USERNAME, Some(PASSWORD))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["data"]["user"]["id"], id.as_str());
}

#[tokio::test]
async fn auth_is_required_for_reads() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/users", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "error");

    let res = client
        .get(format!("{}/users", srv.base_url))
        .basic_auth(USERNAME, Some("wrong"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/user?id={}", srv.base_url, uuid::Uuid::new_v4()))
        .basic_auth(USERNAME, Some(PASSWORD))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!({"status": "error", "message": "Not Found"}));
}

#[tokio::test]
async fn missing_email_is_rejected_with_field_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users", srv.base_url))
        .json(&json!({ "mail": "typo@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "bad request");
    assert_eq!(body["message"], "invalid data");
    assert_eq!(body["data"]["json"]["email"][0], "Missing data for required field.");
    assert_eq!(body["data"]["json"]["mail"][0], "Unknown field.");
}

#[tokio::test]
async fn repeated_lists_are_identical() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for email in ["u1@x.com", "u2@x.com"] {
        client
            .post(format!("{}/users", srv.base_url))
            .json(&json!({ "email": email }))
            .send()
            .await
            .unwrap();
    }

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let res = client
            .get(format!("{}/users", srv.base_url))
            .basic_auth(USERNAME, Some(PASSWORD))
            .send()
            .await
            .unwrap();
        bodies.push(res.json::<serde_json::Value>().await.unwrap());
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["data"]["users"].as_array().unwrap().len(), 2);
}
