//! Infrastructure layer for the FitCoach client.
//!
//! Contains implementations of the port traits defined in `fitcoach-core`:
//! the SQLite-backed durable store, the reqwest client for the backend REST
//! API, and the data directory and `config.toml` loaders.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod sqlite;
