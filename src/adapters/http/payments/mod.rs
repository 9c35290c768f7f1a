//! HTTP adapter for payments and settlement status.
//!
//! - `POST /api/payments` - Record a payment (donation + membership status)
//! - `POST /api/payments/:id/cash` - Cash a payment in
//! - `POST /api/payments/:id/cancel`
//! - `GET /api/payments/status?familyId=|memberId=&seasonId=` - Due/paid/balance
//! - `GET /api/payments?...`, `GET /api/payments/:id`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
