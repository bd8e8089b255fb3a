//! Tracklog - paragliding track ingestion and lookup service.
//!
//! Tracklog ingests IGC flight-track files by URL, normalizes them into
//! canonical track records, and serves them back over a small REST API:
//! whole records, single fields, and a bounded "ticker" page of recent
//! identifiers.
//!
//! # Architecture
//!
//! - `parser`: fetches and decodes track files (the external-collaborator
//!   seam; swap in a canned parser for tests)
//! - `storage`: append-only store abstraction with an in-memory backend
//! - `core`: domain models, geometry, identifiers, configuration
//! - `api`: axum HTTP surface
//! - `cli`: command-line interface and bootstrap
//!
//! # Example
//!
//! ```no_run
//! use tracklog::api::{self, ApiState};
//! use tracklog::core::Config;
//! use tracklog::parser::HttpTrackParser;
//! use tracklog::storage::InMemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> tracklog::Result<()> {
//!     let config = Config::default();
//!     let store = Arc::new(InMemoryStore::new());
//!     let parser = Arc::new(HttpTrackParser::new(&config.ingest)?);
//!     api::start_server(ApiState::new(store, parser), &config).await
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod cli;
pub mod core;
pub mod parser;
pub mod storage;

// Re-export core types for convenience
pub use crate::core::{Config, Result};
