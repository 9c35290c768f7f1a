//! HTTP handlers for membership endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    CreateMembershipRequest, MembershipListParams, MembershipResponse, UpdateMembershipRequest,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::application::handlers::membership::{CreateMembershipCommand, UpdateMembershipCommand};
use crate::domain::foundation::MembershipId;

/// GET /api/memberships?memberId=&seasonId=
pub async fn list_memberships(
    State(state): State<AppState>,
    Query(params): Query<MembershipListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let memberships = state.membership_handlers().list(params.into()).await?;
    Ok(Json(
        memberships
            .into_iter()
            .map(MembershipResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/memberships/:id
pub async fn get_membership(
    State(state): State<AppState>,
    Path(id): Path<MembershipId>,
) -> Result<impl IntoResponse, ApiError> {
    let membership = state.membership_handlers().get(id).await?;
    Ok(Json(MembershipResponse::from(membership)))
}

/// POST /api/memberships
pub async fn create_membership(
    State(state): State<AppState>,
    Json(request): Json<CreateMembershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateMembershipCommand {
        member_id: request.member_id,
        season_id: request.season_id,
        amount: request.amount,
        membership_date: request.membership_date,
    };
    let membership = state.membership_handlers().create(cmd).await?;
    Ok((StatusCode::CREATED, Json(MembershipResponse::from(membership))))
}

/// PUT /api/memberships/:id
pub async fn update_membership(
    State(state): State<AppState>,
    Path(id): Path<MembershipId>,
    Json(request): Json<UpdateMembershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateMembershipCommand {
        membership_id: id,
        amount: request.amount,
        membership_date: request.membership_date,
    };
    let membership = state.membership_handlers().update(cmd).await?;
    Ok(Json(MembershipResponse::from(membership)))
}

/// POST /api/memberships/:id/cancel
pub async fn cancel_membership(
    State(state): State<AppState>,
    Path(id): Path<MembershipId>,
) -> Result<impl IntoResponse, ApiError> {
    let membership = state.membership_handlers().cancel(id).await?;
    Ok(Json(MembershipResponse::from(membership)))
}

/// DELETE /api/memberships/:id
pub async fn delete_membership(
    State(state): State<AppState>,
    Path(id): Path<MembershipId>,
) -> Result<impl IntoResponse, ApiError> {
    state.membership_handlers().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
