//! Route configuration for season endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    activate_season, create_season, get_active_season, get_season, list_seasons, update_season,
};
use crate::adapters::http::AppState;

/// Season routes, mounted at `/api/seasons`.
pub fn season_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_seasons).post(create_season))
        .route("/active", get(get_active_season))
        .route("/:id", get(get_season).put(update_season))
        .route("/:id/activate", post(activate_season))
}
