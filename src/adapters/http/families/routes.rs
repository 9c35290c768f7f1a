//! Route configuration for family and member endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    create_family, create_member, get_family, get_member, list_families, list_members,
    update_family, update_member,
};
use crate::adapters::http::AppState;

/// Family routes, mounted at `/api/families`.
pub fn family_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_families).post(create_family))
        .route("/:id", get(get_family).put(update_family))
}

/// Member routes, mounted at `/api/members`.
pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_members).post(create_member))
        .route("/:id", get(get_member).put(update_member))
}
