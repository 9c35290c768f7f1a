//! Route configuration for membership endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    cancel_membership, create_membership, delete_membership, get_membership, list_memberships,
    update_membership,
};
use crate::adapters::http::AppState;

/// Membership routes, mounted at `/api/memberships`.
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_memberships).post(create_membership))
        .route(
            "/:id",
            get(get_membership)
                .put(update_membership)
                .delete(delete_membership),
        )
        .route("/:id/cancel", post(cancel_membership))
}
