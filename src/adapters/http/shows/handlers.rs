//! HTTP handlers for show endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{ShowClientRequest, ShowClientResponse, ShowListParams, ShowRequest, ShowResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::domain::foundation::{today, ShowClientId, ShowId};
use crate::domain::show::Show;

fn show_list(shows: Vec<Show>) -> Json<Vec<ShowResponse>> {
    Json(shows.into_iter().map(ShowResponse::from).collect())
}

// ─── clients ───

/// GET /api/shows/clients
pub async fn list_clients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let clients = state.show_handlers().list_clients().await?;
    Ok(Json(
        clients
            .into_iter()
            .map(ShowClientResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/shows/clients/:id
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<ShowClientId>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state.show_handlers().get_client(id).await?;
    Ok(Json(ShowClientResponse::from(client)))
}

/// POST /api/shows/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<ShowClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state.show_handlers().create_client(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ShowClientResponse::from(client))))
}

/// PUT /api/shows/clients/:id
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<ShowClientId>,
    Json(request): Json<ShowClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state
        .show_handlers()
        .update_client(id, request.into())
        .await?;
    Ok(Json(ShowClientResponse::from(client)))
}

// ─── shows ───

/// GET /api/shows?status=&clientId=
pub async fn list_shows(
    State(state): State<AppState>,
    Query(params): Query<ShowListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let shows = state.show_handlers().list_shows(params.into()).await?;
    Ok(show_list(shows))
}

/// GET /api/shows/upcoming - Not cancelled, scheduled today or later
pub async fn list_upcoming_shows(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let shows = state.show_handlers().upcoming(today()).await?;
    Ok(show_list(shows))
}

/// GET /api/shows/:id
pub async fn get_show(
    State(state): State<AppState>,
    Path(id): Path<ShowId>,
) -> Result<impl IntoResponse, ApiError> {
    let show = state.show_handlers().get_show(id).await?;
    Ok(Json(ShowResponse::from(show)))
}

/// POST /api/shows
pub async fn create_show(
    State(state): State<AppState>,
    Json(request): Json<ShowRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let show = state.show_handlers().create_show(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ShowResponse::from(show))))
}

/// PUT /api/shows/:id
pub async fn update_show(
    State(state): State<AppState>,
    Path(id): Path<ShowId>,
    Json(request): Json<ShowRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let show = state.show_handlers().update_show(id, request.into()).await?;
    Ok(Json(ShowResponse::from(show)))
}
