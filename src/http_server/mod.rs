//! # HTTP Server Module
//!
//! JSON API for publishing and reading trading signals and registering
//! subscribers.
//!
//! # Endpoints
//!
//! - `/` and `/api/hello` - greetings
//! - `/health` - Health check
//! - `/test` - document store diagnostic
//! - `/api/subscribe` - register a subscriber
//! - `/api/signals` - list and publish signals

pub mod config;
mod errors;
mod response;
pub mod root_routes;
pub mod server;
pub mod signal_routes;
mod state;
pub mod subscriber_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse, INTERNAL_ERROR_MESSAGE};
pub use response::{CreatedResponse, DiagnosticResponse, HealthResponse, MessageResponse};
pub use server::HttpServer;
pub use state::AppState;
