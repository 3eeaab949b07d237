#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use copydesk::config::Config;
use copydesk::db::ContentStore;
use copydesk::router::{AppState, copydesk_router};
use headers::{Authorization, HeaderMapExt};
use serde_json::Value;
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

/// A throwaway SQLite file removed (with its WAL side files) on drop.
pub struct TempDb {
    path: PathBuf,
}

impl TempDb {
    pub fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "copydesk-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        Self { path }
    }

    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = fs::remove_file(format!("{}{suffix}", self.path.display()));
        }
    }
}

pub async fn ready_store(db: &TempDb) -> ContentStore {
    let store = ContentStore::connect(&db.url())
        .await
        .expect("failed to open sqlite store");
    store.initialize().await.expect("initialize failed");
    store
}

pub async fn test_app(tag: &str, cfg: Config) -> (Router, ContentStore, TempDb) {
    let db = TempDb::new(tag);
    let store = ready_store(&db).await;
    let state = AppState::new(store.clone(), &cfg);
    (copydesk_router(state, &cfg), store, db)
}

pub fn json_request(method: &str, uri: &str, body: &Value, basic: Option<(&str, &str)>) -> Request<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request");
    if let Some((user, pass)) = basic {
        req.headers_mut().typed_insert(Authorization::basic(user, pass));
    }
    req
}

/// A request whose body is sent as-is, for bodies `json!` cannot express.
pub fn raw_request(method: &str, uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not json")
}
