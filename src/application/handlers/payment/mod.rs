//! Payment handlers.
//!
//! ## Commands
//! - Record a payment (with donation and membership reconciliation)
//! - Cash a payment in (membership revalidation)
//! - Cancel a payment
//!
//! ## Queries
//! - Payment status (due / paid / balance) of a family or member
//! - Get / list payments

mod cancel_payment;
mod cash_payment;
mod get_payment_status;
mod queries;
mod record_payment;

pub use cancel_payment::CancelPaymentHandler;
pub use cash_payment::{CashPaymentCommand, CashPaymentHandler};
pub use get_payment_status::{GetPaymentStatusHandler, GetPaymentStatusQuery};
pub use queries::{GetPaymentHandler, ListPaymentsHandler};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler, RecordPaymentResult};
