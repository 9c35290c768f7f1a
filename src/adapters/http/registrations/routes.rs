//! Route configuration for registration endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    create_registration, delete_registration, get_registration, list_registrations,
    replace_workshops,
};
use crate::adapters::http::AppState;

/// Registration routes, mounted at `/api/registrations`.
pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_registrations).post(create_registration))
        .route("/:id", get(get_registration).delete(delete_registration))
        .route("/:id/workshops", put(replace_workshops))
}
