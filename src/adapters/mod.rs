//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API (axum)
//! - `postgres` - PostgreSQL repositories (sqlx)
//! - `memory` - In-memory store implementing every port

pub mod http;
pub mod memory;
pub mod postgres;

pub use http::{api_router, AppState};
pub use memory::InMemoryStore;
