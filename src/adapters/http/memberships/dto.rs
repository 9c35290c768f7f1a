//! Request and response bodies for membership endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemberId, MembershipId, Money, SeasonId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::MembershipFilter;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMembershipRequest {
    pub member_id: MemberId,
    pub season_id: SeasonId,
    /// Defaults to the season's membership amount.
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub membership_date: Option<NaiveDate>,
}

/// Status is derived from payments and cannot be set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMembershipRequest {
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub membership_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipResponse {
    pub id: MembershipId,
    pub member_id: MemberId,
    pub season_id: SeasonId,
    pub amount: Money,
    pub membership_date: NaiveDate,
    pub status: MembershipStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self {
            id: membership.id,
            member_id: membership.member_id,
            season_id: membership.season_id,
            amount: membership.amount,
            membership_date: membership.membership_date,
            status: membership.status,
            created_at: membership.created_at.as_datetime().to_rfc3339(),
            updated_at: membership.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Query string of `GET /memberships`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipListParams {
    pub member_id: Option<MemberId>,
    pub season_id: Option<SeasonId>,
}

impl From<MembershipListParams> for MembershipFilter {
    fn from(params: MembershipListParams) -> Self {
        MembershipFilter {
            member_id: params.member_id,
            season_id: params.season_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_ignores_status() {
        let request: UpdateMembershipRequest =
            serde_json::from_value(serde_json::json!({"status": "validated"})).unwrap();
        assert!(request.amount.is_none());
        assert!(request.membership_date.is_none());
    }
}
