//! Request and response bodies for payment endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::payment::RecordPaymentResult;
use crate::domain::foundation::{
    FamilyId, MemberId, Money, PaymentId, SeasonId, ShowClientId, ValidationError,
};
use crate::domain::membership::MembershipStatus;
use crate::domain::payment::{Payment, PaymentScope, PaymentStatus, PaymentType, SettlementScope};
use crate::domain::settlement::{SettlementStatus, SettlementSummary};
use crate::ports::PaymentFilter;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /payments`. Exactly one of the three scope ids is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    #[serde(default)]
    pub family_id: Option<FamilyId>,
    #[serde(default)]
    pub member_id: Option<MemberId>,
    #[serde(default)]
    pub show_client_id: Option<ShowClientId>,
    #[serde(default)]
    pub season_id: Option<SeasonId>,
    pub amount: Money,
    pub payment_type: PaymentType,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RecordPaymentRequest {
    pub fn scope(&self) -> Result<PaymentScope, ValidationError> {
        PaymentScope::from_parts(self.family_id, self.member_id, self.show_client_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashPaymentRequest {
    pub cashing_date: NaiveDate,
}

/// Query string of `GET /payments/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusParams {
    pub family_id: Option<FamilyId>,
    pub member_id: Option<MemberId>,
    pub season_id: Option<SeasonId>,
}

impl PaymentStatusParams {
    pub fn scope(&self) -> Result<SettlementScope, ValidationError> {
        match (self.family_id, self.member_id) {
            (Some(id), None) => Ok(SettlementScope::Family(id)),
            (None, Some(id)) => Ok(SettlementScope::Member(id)),
            (None, None) => Err(ValidationError::empty_field("familyId|memberId")),
            (Some(_), Some(_)) => Err(ValidationError::invalid_format(
                "scope",
                "give either familyId or memberId, not both",
            )),
        }
    }
}

/// Query string of `GET /payments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListParams {
    pub family_id: Option<FamilyId>,
    pub member_id: Option<MemberId>,
    pub show_client_id: Option<ShowClientId>,
    pub season_id: Option<SeasonId>,
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub uncashed_only: bool,
}

impl From<PaymentListParams> for PaymentFilter {
    fn from(params: PaymentListParams) -> Self {
        PaymentFilter {
            family_id: params.family_id,
            member_id: params.member_id,
            show_client_id: params.show_client_id,
            season_id: params.season_id,
            status: params.status,
            uncashed_only: params.uncashed_only,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: PaymentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<FamilyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<MemberId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_client_id: Option<ShowClientId>,
    pub season_id: Option<SeasonId>,
    pub amount: Money,
    pub payment_type: PaymentType,
    pub payment_date: NaiveDate,
    pub cashing_date: Option<NaiveDate>,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub status: PaymentStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            family_id: payment.scope.family_id(),
            member_id: payment.scope.member_id(),
            show_client_id: payment.scope.show_client_id(),
            season_id: payment.season_id,
            amount: payment.amount,
            payment_type: payment.payment_type,
            payment_date: payment.payment_date,
            cashing_date: payment.cashing_date,
            reference: payment.reference,
            notes: payment.notes,
            status: payment.status,
            created_at: payment.created_at.as_datetime().to_rfc3339(),
            updated_at: payment.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// The recorded payment plus what reconciling it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentResponse {
    #[serde(flatten)]
    pub payment: PaymentResponse,
    /// Share of the payment above what was due, added to the season's donations.
    pub donation: Money,
    /// Status written to the scope's memberships, when any were touched.
    pub membership_status: Option<MembershipStatus>,
}

impl From<RecordPaymentResult> for RecordPaymentResponse {
    fn from(result: RecordPaymentResult) -> Self {
        Self {
            payment: result.payment.into(),
            donation: result.donation,
            membership_status: result.membership_status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub total_due: Money,
    pub total_paid: Money,
    pub balance: Money,
    pub donation: Money,
    pub is_fully_paid: bool,
    pub status: SettlementStatus,
}

impl From<SettlementSummary> for PaymentStatusResponse {
    fn from(summary: SettlementSummary) -> Self {
        Self {
            total_due: summary.total_due,
            total_paid: summary.total_paid,
            balance: summary.balance,
            donation: summary.donation,
            is_fully_paid: summary.is_fully_paid,
            status: summary.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_scope_requires_exactly_one_id() {
        let none = PaymentStatusParams::default();
        assert!(matches!(none.scope(), Err(ValidationError::EmptyField { .. })));

        let both = PaymentStatusParams {
            family_id: Some(FamilyId::new()),
            member_id: Some(MemberId::new()),
            season_id: None,
        };
        assert!(matches!(both.scope(), Err(ValidationError::InvalidFormat { .. })));

        let family_id = FamilyId::new();
        let family = PaymentStatusParams {
            family_id: Some(family_id),
            ..Default::default()
        };
        assert_eq!(family.scope().unwrap(), SettlementScope::Family(family_id));
    }

    #[test]
    fn payment_response_exposes_only_its_scope_id() {
        let payment = crate::domain::payment::test_support::family_payment(120);
        let json = serde_json::to_value(PaymentResponse::from(payment)).unwrap();
        assert!(json.get("familyId").is_some());
        assert!(json.get("memberId").is_none());
        assert!(json.get("showClientId").is_none());
        assert_eq!(json["amount"], "120.00");
        assert_eq!(json["paymentType"], "check");
    }
}
