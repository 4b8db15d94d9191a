//! Service Routes
//!
//! Liveness, greeting and store diagnostic endpoints.

use axum::{extract::State, routing::get, Json, Router};
use tracing::warn;

use super::response::{DiagnosticResponse, HealthResponse, MessageResponse};
use super::state::AppState;

/// Number of collection names reported by the diagnostic
pub const DIAGNOSTIC_COLLECTION_LIMIT: usize = 10;

const ERROR_DETAIL_CHARS: usize = 50;

/// Create service routes
pub fn root_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/hello", get(hello_handler))
        .route("/health", get(health_handler))
        .route("/test", get(diagnostic_handler))
        .with_state(state)
}

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Gold Signals API running"))
}

async fn hello_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello from the backend API!"))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn diagnostic_handler(State(state): State<AppState>) -> Json<DiagnosticResponse> {
    Json(diagnose(&state))
}

/// Reports whether the store is configured and answering.
///
/// Never fails: store errors are folded into the `database` field.
pub fn diagnose(state: &AppState) -> DiagnosticResponse {
    let set = |present: bool| (if present { "Set" } else { "Not Set" }).to_string();

    let mut report = DiagnosticResponse {
        backend: "Running".to_string(),
        database: "Available but not initialized".to_string(),
        database_url: set(state.database().url.is_some()),
        database_name: set(state.database().name.is_some()),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let Ok(store) = state.store() else {
        return report;
    };

    report.connection_status = "Connected".to_string();
    match store.list_collections() {
        Ok(mut names) => {
            names.truncate(DIAGNOSTIC_COLLECTION_LIMIT);
            report.collections = names;
            report.database = format!("Connected & Working ({})", store.name());
        }
        Err(e) => {
            warn!(error = %e, "store diagnostic failed");
            let detail: String = e.to_string().chars().take(ERROR_DETAIL_CHARS).collect();
            report.database = format!("Connected but Error: {}", detail);
        }
    }
    report
}
