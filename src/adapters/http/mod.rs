//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module (`dto`, `handlers`, `routes`); they share
//! one [`AppState`] and one [`ApiError`](error::ApiError) mapping.

pub mod error;
pub mod families;
pub mod memberships;
pub mod payments;
pub mod registrations;
pub mod seasons;
pub mod shows;
mod state;
pub mod workshops;

use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Builds the complete API router, every route under `/api`.
///
/// Middleware layers (tracing, CORS, timeouts) are added by the caller.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/seasons", seasons::season_routes())
        .nest("/families", families::family_routes())
        .nest("/members", families::member_routes())
        .nest("/workshops", workshops::workshop_routes())
        .nest("/memberships", memberships::membership_routes())
        .nest("/registrations", registrations::registration_routes())
        .nest("/payments", payments::payment_routes())
        .nest("/shows", shows::show_routes());

    Router::new().nest("/api", api).with_state(state)
}
