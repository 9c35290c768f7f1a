//! HTTP handlers for season endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{SeasonRequest, SeasonResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::application::handlers::season::UpdateSeasonCommand;
use crate::domain::foundation::SeasonId;
use crate::domain::season::SeasonDetails;

/// GET /api/seasons
pub async fn list_seasons(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let seasons = state.season_queries().list().await?;
    Ok(Json(
        seasons
            .into_iter()
            .map(SeasonResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/seasons/active
pub async fn get_active_season(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let season = state.season_queries().active().await?;
    Ok(Json(SeasonResponse::from(season)))
}

/// GET /api/seasons/:id
pub async fn get_season(
    State(state): State<AppState>,
    Path(id): Path<SeasonId>,
) -> Result<impl IntoResponse, ApiError> {
    let season = state.season_queries().get(id).await?;
    Ok(Json(SeasonResponse::from(season)))
}

/// POST /api/seasons
pub async fn create_season(
    State(state): State<AppState>,
    Json(request): Json<SeasonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let details = SeasonDetails::try_from(request)?;
    let season = state.create_season_handler().handle(details).await?;
    Ok((StatusCode::CREATED, Json(SeasonResponse::from(season))))
}

/// PUT /api/seasons/:id
pub async fn update_season(
    State(state): State<AppState>,
    Path(id): Path<SeasonId>,
    Json(request): Json<SeasonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateSeasonCommand {
        season_id: id,
        details: SeasonDetails::try_from(request)?,
    };
    let season = state.update_season_handler().handle(cmd).await?;
    Ok(Json(SeasonResponse::from(season)))
}

/// POST /api/seasons/:id/activate
pub async fn activate_season(
    State(state): State<AppState>,
    Path(id): Path<SeasonId>,
) -> Result<impl IntoResponse, ApiError> {
    let season = state.activate_season_handler().handle(id).await?;
    Ok(Json(SeasonResponse::from(season)))
}
