//! gold_signals - XAUUSD trading signal API
//!
//! Layers, outermost first:
//! - `cli` and `config`: process start-up
//! - `http_server`: axum routes and handlers
//! - `mapper`: typed records to and from store documents
//! - `schema`: record shapes and validation
//! - `store`: document persistence

pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod mapper;
pub mod schema;
pub mod store;
