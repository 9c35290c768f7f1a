//! Route configuration for workshop endpoints.

use axum::routing::{get, put};
use axum::Router;

use super::handlers::{
    create_workshop, get_workshop, list_workshops, set_workshop_price, update_workshop,
};
use crate::adapters::http::AppState;

/// Workshop routes, mounted at `/api/workshops`.
pub fn workshop_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workshops).post(create_workshop))
        .route("/:id", get(get_workshop).put(update_workshop))
        .route("/:id/price", put(set_workshop_price))
}
