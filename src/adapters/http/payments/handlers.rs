//! HTTP handlers for payment endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{
    CashPaymentRequest, PaymentListParams, PaymentResponse, PaymentStatusParams,
    PaymentStatusResponse, RecordPaymentRequest, RecordPaymentResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::AppState;
use crate::application::handlers::payment::{
    CashPaymentCommand, GetPaymentStatusQuery, RecordPaymentCommand,
};
use crate::domain::foundation::PaymentId;

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/payments - Newest payment date first
pub async fn list_payments(
    State(state): State<AppState>,
    Query(params): Query<PaymentListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let payments = state.list_payments_handler().handle(params.into()).await?;
    Ok(Json(
        payments
            .into_iter()
            .map(PaymentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// GET /api/payments/:id
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.get_payment_handler().handle(id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

/// GET /api/payments/status?familyId=|memberId=&seasonId=
pub async fn get_payment_status(
    State(state): State<AppState>,
    Query(params): Query<PaymentStatusParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetPaymentStatusQuery {
        scope: params.scope()?,
        season_id: params.season_id,
    };
    let summary = state.payment_status_handler().handle(query).await?;
    Ok(Json(PaymentStatusResponse::from(summary)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payments
pub async fn record_payment(
    State(state): State<AppState>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RecordPaymentCommand {
        scope: request.scope()?,
        season_id: request.season_id,
        amount: request.amount,
        payment_type: request.payment_type,
        payment_date: request.payment_date,
        reference: request.reference,
        notes: request.notes,
    };
    let result = state.record_payment_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(RecordPaymentResponse::from(result))))
}

/// POST /api/payments/:id/cash
pub async fn cash_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
    Json(request): Json<CashPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CashPaymentCommand {
        payment_id: id,
        cashing_date: request.cashing_date,
    };
    let payment = state.cash_payment_handler().handle(cmd).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

/// POST /api/payments/:id/cancel
pub async fn cancel_payment(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
) -> Result<impl IntoResponse, ApiError> {
    let payment = state.cancel_payment_handler().handle(id).await?;
    Ok(Json(PaymentResponse::from(payment)))
}
