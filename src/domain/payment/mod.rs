//! Payment domain module.
//!
//! - `aggregate` - Payment entity
//! - `scope` - Family / member / show-client attribution
//! - `status` - PaymentStatus state machine and PaymentType

mod aggregate;
mod scope;
mod status;

pub use aggregate::{NewPayment, Payment};
pub use scope::{PaymentScope, SettlementScope};
pub use status::{PaymentStatus, PaymentType};

#[cfg(test)]
pub(crate) use aggregate::test_support;
