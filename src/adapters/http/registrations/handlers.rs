//! HTTP handlers for registration endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    CreateRegistrationRequest, RegistrationListParams, RegistrationResponse,
    ReplaceWorkshopsRequest,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::application::handlers::registration::{
    CreateRegistrationCommand, ReplaceWorkshopsCommand,
};
use crate::domain::foundation::RegistrationId;

/// GET /api/registrations?seasonId=
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(params): Query<RegistrationListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let registrations = state
        .list_registrations_handler()
        .handle(params.season_id)
        .await?;
    Ok(Json(
        registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/registrations/:id
pub async fn get_registration(
    State(state): State<AppState>,
    Path(id): Path<RegistrationId>,
) -> Result<impl IntoResponse, ApiError> {
    let registration = state.get_registration_handler().handle(id).await?;
    Ok(Json(RegistrationResponse::from(registration)))
}

/// POST /api/registrations
pub async fn create_registration(
    State(state): State<AppState>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let family_order = request.family_order()?;
    let cmd = CreateRegistrationCommand {
        member_id: request.member_id,
        season_id: request.season_id,
        registration_date: request.registration_date,
        family_order,
        workshops: request.workshops(),
    };
    let registration = state.create_registration_handler().handle(cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(registration)),
    ))
}

/// PUT /api/registrations/:id/workshops - Full replace of the workshop set
pub async fn replace_workshops(
    State(state): State<AppState>,
    Path(id): Path<RegistrationId>,
    Json(request): Json<ReplaceWorkshopsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let family_order = request.family_order()?;
    let cmd = ReplaceWorkshopsCommand {
        registration_id: id,
        family_order,
        workshops: request.workshops(),
    };
    let registration = state.replace_workshops_handler().handle(cmd).await?;
    Ok(Json(RegistrationResponse::from(registration)))
}

/// DELETE /api/registrations/:id
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<RegistrationId>,
) -> Result<impl IntoResponse, ApiError> {
    state.delete_registration_handler().handle(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
