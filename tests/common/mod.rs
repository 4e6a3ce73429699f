#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;
use tower::ServiceExt;

use iris_paralympics::iris::model::SpeciesPredictor;
use iris_paralympics::{db, iris, paralympics};

pub const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/model_lr.json");

/// A fresh seeded SQLite file inside a temporary directory. Keep the `TempDir` alive for the
/// duration of the test.
async fn temp_db() -> (DatabaseConnection, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let conn = db::connect(&url).await.unwrap();
    (conn, dir)
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    _dir: TempDir,
}

pub async fn iris_app() -> TestApp {
    let (conn, dir) = temp_db().await;
    db::prepare_iris(&conn, true).await.unwrap();
    let predictor = SpeciesPredictor::load(MODEL_PATH).unwrap();
    let state = Arc::new(iris::server::State::new(conn.clone(), predictor));
    TestApp {
        router: iris::server::router(state),
        db: conn,
        _dir: dir,
    }
}

pub async fn paralympics_app() -> TestApp {
    let (conn, dir) = temp_db().await;
    db::prepare_paralympics(&conn, true).await.unwrap();
    let state = Arc::new(paralympics::server::State::new(conn.clone()));
    TestApp {
        router: paralympics::server::router(state),
        db: conn,
        _dir: dir,
    }
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// Issue a request with an optional JSON body and decode the JSON response.
pub async fn api(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let (status, bytes) = send(router, builder.body(body).unwrap()).await;
    let json = if bytes.is_empty() {
        serde_json::json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::json!(null))
    };
    (status, json)
}

/// Issue a GET and return the body as text.
pub async fn get_text(router: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, bytes) = send(router, req).await;
    (status, String::from_utf8(bytes).unwrap())
}

/// POST an already url-encoded form and return the body as text.
pub async fn post_form(router: &Router, uri: &str, form: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    let (status, bytes) = send(router, req).await;
    (status, String::from_utf8(bytes).unwrap())
}
