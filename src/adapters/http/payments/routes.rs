//! Route configuration for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    cancel_payment, cash_payment, get_payment, get_payment_status, list_payments, record_payment,
};
use crate::adapters::http::AppState;

/// Payment routes, mounted at `/api/payments`.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(record_payment))
        .route("/status", get(get_payment_status))
        .route("/:id", get(get_payment))
        .route("/:id/cash", post(cash_payment))
        .route("/:id/cancel", post(cancel_payment))
}
