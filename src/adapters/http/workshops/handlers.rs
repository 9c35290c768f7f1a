//! HTTP handlers for workshop endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    WorkshopDetailResponse, WorkshopListParams, WorkshopPriceRequest, WorkshopPriceResponse,
    WorkshopRequest, WorkshopResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::application::handlers::workshop::SetWorkshopPriceCommand;
use crate::domain::foundation::WorkshopId;

/// GET /api/workshops?activeOnly=&seasonId=
pub async fn list_workshops(
    State(state): State<AppState>,
    Query(params): Query<WorkshopListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let workshops = state
        .workshop_handlers()
        .list(params.active_only, params.season_id)
        .await?;
    Ok(Json(
        workshops
            .into_iter()
            .map(WorkshopResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/workshops/:id - Workshop with its prices
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(id): Path<WorkshopId>,
) -> Result<impl IntoResponse, ApiError> {
    let workshop = state.workshop_handlers().get(id).await?;
    Ok(Json(WorkshopDetailResponse::from(workshop)))
}

/// POST /api/workshops
pub async fn create_workshop(
    State(state): State<AppState>,
    Json(request): Json<WorkshopRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let workshop = state.workshop_handlers().create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(WorkshopResponse::from(workshop))))
}

/// PUT /api/workshops/:id
pub async fn update_workshop(
    State(state): State<AppState>,
    Path(id): Path<WorkshopId>,
    Json(request): Json<WorkshopRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let workshop = state.workshop_handlers().update(id, request.into()).await?;
    Ok(Json(WorkshopResponse::from(workshop)))
}

/// PUT /api/workshops/:id/price
pub async fn set_workshop_price(
    State(state): State<AppState>,
    Path(id): Path<WorkshopId>,
    Json(request): Json<WorkshopPriceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SetWorkshopPriceCommand {
        workshop_id: id,
        season_id: request.season_id,
        amount: request.amount,
    };
    let price = state.workshop_handlers().set_price(cmd).await?;
    Ok(Json(WorkshopPriceResponse::from(price)))
}
