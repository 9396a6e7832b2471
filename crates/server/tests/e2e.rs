use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::routes::{self, ServerState};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_group(&self, group_number: &str) -> anyhow::Result<i64> {
        let res = self
            .client
            .post(self.url("/groups"))
            .json(&json!({"group_number": group_number}))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        Ok(res.json::<Value>().await?["group"]["id"].as_i64().unwrap_or_default())
    }

    async fn create_student(&self, body: &Value) -> anyhow::Result<i64> {
        let res = self.client.post(self.url("/students")).json(body).send().await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
        Ok(res.json::<Value>().await?["student"]["id"].as_i64().unwrap_or_default())
    }
}

fn student(full_name: &str, age: i32, group_number: &str, email: &str) -> Value {
    json!({"full_name": full_name, "age": age, "group_number": group_number, "email": email})
}

/// Every failure answers `{"error": "<message>"}` as JSON; returns the message.
async fn expect_error(res: reqwest::Response, status: HttpStatusCode) -> anyhow::Result<String> {
    assert_eq!(res.status(), status);
    let content_type = res
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("application/json"), "content-type was {content_type}");
    let body = res.json::<Value>().await?;
    let obj = body.as_object().map(|o| o.len());
    assert_eq!(obj, Some(1), "unexpected error body {body}");
    Ok(body["error"].as_str().unwrap_or_default().to_string())
}

async fn test_router() -> anyhow::Result<Router> {
    // 内存库只在单个连接内可见
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(routes::build_router(ServerState::new(db), cors(), Duration::from_secs(10)))
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = test_router().await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, client: reqwest::Client::new() })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.client.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_openapi_document_is_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app.client.get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert!(body["paths"]["/students/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn e2e_enrolment_scenario() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;

    let res = c.post(app.url("/groups")).json(&json!({"group_number": "G1"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["group"]["group_number"], "G1");

    let alice = student("Alice", 20, "G1", "a@x.com");
    let res = c.post(app.url("/students")).json(&alice).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(
        body["student"],
        json!({"id": 1, "full_name": "Alice", "age": 20, "group_number": "G1", "email": "a@x.com"})
    );

    // 重复邮箱
    let dup = student("Bob", 21, "G1", "a@x.com");
    let res = c.post(app.url("/students")).json(&dup).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::CONFLICT).await?, "student already exists");

    // 不存在的组
    let orphan = student("Bob", 21, "G2", "b@x.com");
    let res = c.post(app.url("/students")).json(&orphan).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::BAD_REQUEST).await?, "group G2 not found");

    let res = c.delete(app.url("/students/99")).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::NOT_FOUND).await?, "student not found");

    let res = c.get(app.url("/students")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["students"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["students"][0]["email"], "a@x.com");
    Ok(())
}

#[tokio::test]
async fn e2e_group_crud() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;

    let res = c.get(app.url("/groups")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"groups": []}));

    let id = app.create_group("G1").await?;
    assert!(id > 0);

    let res = c.post(app.url("/groups")).json(&json!({"group_number": "G1"})).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::CONFLICT).await?, "group already exists");

    let res = c
        .put(app.url(&format!("/groups/{id}")))
        .json(&json!({"group_number": "G1-b"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["group"], json!({"id": id, "group_number": "G1-b"}));

    let res = c.get(app.url(&format!("/groups/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.delete(app.url(&format!("/groups/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = c.get(app.url(&format!("/groups/{id}"))).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::NOT_FOUND).await?, "group not found");

    let res = c.delete(app.url(&format!("/groups/{id}"))).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::NOT_FOUND).await?, "group not found");
    Ok(())
}

#[tokio::test]
async fn e2e_student_update_and_delete() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;
    app.create_group("G1").await?;
    app.create_group("G2").await?;
    let id = app.create_student(&student("Alice", 20, "G1", "a@x.com")).await?;

    let res = c
        .put(app.url(&format!("/students/{id}")))
        .json(&student("Alice Smith", 21, "G3", "a@x.com"))
        .send()
        .await?;
    assert_eq!(expect_error(res, HttpStatusCode::BAD_REQUEST).await?, "group G3 not found");

    let res = c
        .put(app.url(&format!("/students/{id}")))
        .json(&student("Alice Smith", 21, "G2", "a@x.com"))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["student"]["group_number"], "G2");

    let res = c
        .put(app.url("/students/99"))
        .json(&student("Zed", 40, "G1", "z@x.com"))
        .send()
        .await?;
    assert_eq!(expect_error(res, HttpStatusCode::NOT_FOUND).await?, "student not found");

    let res = c.delete(app.url(&format!("/students/{id}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(app.url(&format!("/students/{id}"))).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::NOT_FOUND).await?, "student not found");
    let res = c.delete(app.url(&format!("/students/{id}"))).send().await?;
    assert_eq!(expect_error(res, HttpStatusCode::NOT_FOUND).await?, "student not found");
    Ok(())
}

#[tokio::test]
async fn e2e_update_onto_another_students_email_conflicts() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;
    app.create_group("G1").await?;
    app.create_student(&student("Alice", 20, "G1", "a@x.com")).await?;
    let bob = app.create_student(&student("Bob", 21, "G1", "b@x.com")).await?;

    let res = c
        .put(app.url(&format!("/students/{bob}")))
        .json(&student("Bob", 21, "G1", "a@x.com"))
        .send()
        .await?;
    assert_eq!(expect_error(res, HttpStatusCode::CONFLICT).await?, "student already exists");

    let res = c.get(app.url(&format!("/students/{bob}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["student"]["email"], "b@x.com");
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_ids_answer_json() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;
    app.create_group("G1").await?;

    for path in ["/students/abc", "/groups/abc", "/students/99999999999", "/groups/1.5"] {
        let res = c.get(app.url(path)).send().await?;
        let msg = expect_error(res, HttpStatusCode::BAD_REQUEST).await?;
        assert!(msg.starts_with("invalid id"), "{path}: {msg}");

        let res = c.delete(app.url(path)).send().await?;
        expect_error(res, HttpStatusCode::BAD_REQUEST).await?;
    }

    let res = c
        .put(app.url("/students/abc"))
        .json(&student("Alice", 20, "G1", "a@x.com"))
        .send()
        .await?;
    expect_error(res, HttpStatusCode::BAD_REQUEST).await?;

    let res = c
        .put(app.url("/groups/abc"))
        .json(&json!({"group_number": "G2"}))
        .send()
        .await?;
    expect_error(res, HttpStatusCode::BAD_REQUEST).await?;
    Ok(())
}

#[tokio::test]
async fn e2e_bad_bodies_are_rejected() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;

    let res = c
        .post(app.url("/students"))
        .header("content-type", "application/json")
        .body("{\"full_name\": \"Alice\"")
        .send()
        .await?;
    let msg = expect_error(res, HttpStatusCode::BAD_REQUEST).await?;
    assert!(msg.starts_with("failed to decode request"), "{msg}");

    let res = c.post(app.url("/groups")).json(&json!({"group_number": "   "})).send().await?;
    expect_error(res, HttpStatusCode::BAD_REQUEST).await?;

    app.create_group("G1").await?;
    let zero_age = student("Alice", 0, "G1", "a@x.com");
    let res = c.post(app.url("/students")).json(&zero_age).send().await?;
    expect_error(res, HttpStatusCode::BAD_REQUEST).await?;
    Ok(())
}

#[tokio::test]
async fn e2e_shutdown_signal_stops_the_server() -> anyhow::Result<()> {
    let app = test_router().await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(server::serve_router(listener, app, async move {
        let _ = stop_rx.await;
    }));

    let res = reqwest::get(format!("{base_url}/health")).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    res.text().await?;

    let _ = stop_tx.send(());
    let finished = tokio::time::timeout(Duration::from_secs(5), server).await?;
    assert!(finished?.is_ok());
    Ok(())
}
