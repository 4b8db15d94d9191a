//! Subscriber HTTP Routes

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::mapper::{self, Stored, TemporalEncoding};
use crate::schema::{Model, SubscribeRequest, Subscriber};

use super::errors::ApiResult;
use super::response::CreatedResponse;
use super::state::AppState;

/// Create subscriber routes
pub fn subscriber_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/subscribe", post(subscribe_handler))
        .with_state(state)
}

async fn subscribe_handler(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<CreatedResponse>> {
    let Json(body) = payload?;
    subscribe(&state, &body, Utc::now()).map(Json)
}

/// Registers an active subscription starting at `now`.
///
/// The body is validated before the store is touched.
pub fn subscribe(state: &AppState, body: &Value, now: DateTime<Utc>) -> ApiResult<CreatedResponse> {
    let subscriber = SubscribeRequest::from_json(body)?.into_subscriber(now);

    let store = state.store()?;
    let document = mapper::to_document(&subscriber, TemporalEncoding::for_store(store))?;
    let id = store.insert(Subscriber::COLLECTION, document)?;

    info!(%id, plan = subscriber.plan.as_str(), "subscriber created");
    Ok(CreatedResponse::ok(id))
}
