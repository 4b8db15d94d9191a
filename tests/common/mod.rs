//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use gold_signals::http_server::{AppState, HttpServer, HttpServerConfig};
use gold_signals::store::{Document, DocumentId, DocumentStore, MemoryStore, StoreResult};

/// Memory store that counts writes.
#[derive(Debug)]
pub struct CountingStore {
    inner: MemoryStore,
    inserts: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new("test"),
            inserts: AtomicUsize::new(0),
        }
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

impl DocumentStore for CountingStore {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(collection, document)
    }

    fn find(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<usize>,
    ) -> StoreResult<Vec<Document>> {
        self.inner.find(collection, filter, limit)
    }

    fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.inner.list_collections()
    }
}

pub fn router(state: AppState) -> Router {
    HttpServer::with_config(HttpServerConfig::default(), state).router()
}

/// Router over a fresh counting store.
pub fn counting_router() -> (Router, Arc<CountingStore>) {
    let store = Arc::new(CountingStore::new());
    (router(AppState::with_store(store.clone())), store)
}

pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body)).await
}

pub fn violation_fields(body: &Value) -> Vec<String> {
    body["violations"]
        .as_array()
        .map(|vs| {
            vs.iter()
                .filter_map(|v| v["field"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}
