//! Payment status state machine and payment type.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle of a payment.
///
/// ```text
/// pending ──cash-in──► cashed
///    │
///    └────cancel─────► cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Received but not yet cashed (e.g. a check awaiting deposit).
    Pending,

    /// Cashed at the bank. Only cashed payments count as paid.
    Cashed,

    /// Voided.
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Cashed => "cashed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "cashed" => Some(PaymentStatus::Cashed),
            "cancelled" => Some(PaymentStatus::Cancelled),
            _ => None,
        }
    }
}

impl StateMachine for PaymentStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PaymentStatus::*;
        matches!((self, target), (Pending, Cashed) | (Pending, Cancelled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PaymentStatus::*;
        match self {
            Pending => vec![Cashed, Cancelled],
            Cashed | Cancelled => vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Check,
    Transfer,
    Card,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::Check => "check",
            PaymentType::Transfer => "transfer",
            PaymentType::Card => "card",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cash" => Some(PaymentType::Cash),
            "check" => Some(PaymentType::Check),
            "transfer" => Some(PaymentType::Transfer),
            "card" => Some(PaymentType::Card),
            _ => None,
        }
    }
}
