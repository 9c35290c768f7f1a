//! HTTP handlers for family and member endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    FamilyDetailResponse, FamilyRequest, FamilyResponse, MemberListParams, MemberRequest,
    MemberResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::domain::foundation::{FamilyId, MemberId};

// ════════════════════════════════════════════════════════════════════════════════
// Families
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/families
pub async fn list_families(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let families = state.family_handlers().list().await?;
    Ok(Json(
        families
            .into_iter()
            .map(FamilyResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/families/:id - Family with its members
pub async fn get_family(
    State(state): State<AppState>,
    Path(id): Path<FamilyId>,
) -> Result<impl IntoResponse, ApiError> {
    let family = state.family_handlers().get(id).await?;
    Ok(Json(FamilyDetailResponse::from(family)))
}

/// POST /api/families
pub async fn create_family(
    State(state): State<AppState>,
    Json(request): Json<FamilyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let family = state.family_handlers().create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(FamilyResponse::from(family))))
}

/// PUT /api/families/:id
pub async fn update_family(
    State(state): State<AppState>,
    Path(id): Path<FamilyId>,
    Json(request): Json<FamilyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let family = state.family_handlers().update(id, request.into()).await?;
    Ok(Json(FamilyResponse::from(family)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Members
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/members?search=&familyId=
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let members = state.member_handlers().list(params.into()).await?;
    Ok(Json(
        members
            .into_iter()
            .map(MemberResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/members/:id
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state.member_handlers().get(id).await?;
    Ok(Json(MemberResponse::from(member)))
}

/// POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<MemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state.member_handlers().create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// PUT /api/members/:id
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
    Json(request): Json<MemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let member = state.member_handlers().update(id, request.into()).await?;
    Ok(Json(MemberResponse::from(member)))
}
