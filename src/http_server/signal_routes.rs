//! Signal HTTP Routes
//!
//! - `GET /api/signals?limit=N` - list signals in store order
//! - `POST /api/signals` - publish a signal

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::mapper::{self, Stored, TemporalEncoding};
use crate::schema::{Model, Signal, SignalCreateRequest};
use crate::store::Document;

use super::errors::ApiResult;
use super::response::CreatedResponse;
use super::state::AppState;

/// Page size when `limit` is not given
pub const DEFAULT_LIST_LIMIT: usize = 10;

/// Query parameters for listing signals
#[derive(Debug, Default, Deserialize)]
pub struct ListSignalsQuery {
    pub limit: Option<usize>,
}

/// Create signal routes
pub fn signal_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/signals",
            get(list_signals_handler).post(create_signal_handler),
        )
        .with_state(state)
}

async fn list_signals_handler(
    State(state): State<AppState>,
    query: Result<Query<ListSignalsQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Signal>>> {
    let Query(query) = query?;
    list_signals(&state, query.limit.unwrap_or(DEFAULT_LIST_LIMIT)).map(Json)
}

async fn create_signal_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(body) = payload?;
    create_signal(&state, &body).map(Json)
}

/// Validates and stores a new signal.
///
/// The body is validated before the store is touched.
pub fn create_signal(state: &AppState, body: &Value) -> ApiResult<CreatedResponse> {
    let signal = SignalCreateRequest::from_json(body)?.into_signal();

    let store = state.store()?;
    let document = mapper::to_document(&signal, TemporalEncoding::for_store(store))?;
    let id = store.insert(Signal::COLLECTION, document)?;

    info!(%id, action = signal.action.as_str(), "signal created");
    Ok(CreatedResponse::ok(id))
}

/// Returns up to `limit` signals in store order.
///
/// Stored documents that no longer satisfy the signal schema are logged
/// and left out.
pub fn list_signals(state: &AppState, limit: usize) -> ApiResult<Vec<Signal>> {
    let store = state.store()?;
    let documents = store.find(Signal::COLLECTION, &Document::new(), Some(limit))?;

    let batch = mapper::from_documents::<Signal>(documents);
    for rejected in &batch.rejected {
        warn!(error = %rejected, "skipping unreadable signal");
    }
    debug!(
        returned = batch.records.len(),
        skipped = batch.rejected.len(),
        limit,
        "signals listed"
    );
    Ok(batch.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::schema::Action;
    use crate::store::{DocumentStore, MemoryStore};

    fn state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new("test"));
        (AppState::with_store(store.clone()), store)
    }

    #[test]
    fn test_create_then_list() {
        let (state, _) = state();
        let created = create_signal(&state, &json!({"action": "SELL", "entry": 2301.5})).unwrap();
        assert_eq!(created.status, "ok");
        assert!(!created.id.is_empty());

        let signals = list_signals(&state, DEFAULT_LIST_LIMIT).unwrap();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].action, Action::Sell);
        assert_eq!(signals[0].entry, Some(2301.5));
    }

    #[test]
    fn test_invalid_signal_not_stored() {
        let (state, store) = state();
        assert!(create_signal(&state, &json!({"action": "BUY", "confidence": 101})).is_err());
        assert!(create_signal(&state, &json!({"action": "HOLD"})).is_err());
        assert!(store.list_collections().unwrap().is_empty());
    }

    #[test]
    fn test_list_skips_bad_documents() {
        let (state, store) = state();
        create_signal(&state, &json!({"action": "BUY"})).unwrap();
        let mut bad = Document::new();
        bad.insert("action", "HOLD");
        store.insert(Signal::COLLECTION, bad).unwrap();
        create_signal(&state, &json!({"action": "SELL"})).unwrap();

        let signals = list_signals(&state, 10).unwrap();
        let actions: Vec<_> = signals.iter().map(|s| s.action).collect();
        assert_eq!(actions, vec![Action::Buy, Action::Sell]);
    }

    #[test]
    fn test_list_zero_limit() {
        let (state, _) = state();
        create_signal(&state, &json!({"action": "BUY"})).unwrap();
        assert!(list_signals(&state, 0).unwrap().is_empty());
    }
}
