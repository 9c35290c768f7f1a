//! Request and response bodies for family and member endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::family::FamilyWithMembers;
use crate::domain::family::{Family, FamilyDetails, Guardian, Member, MemberDetails};
use crate::domain::foundation::{FamilyId, MemberId};
use crate::ports::MemberFilter;

// ════════════════════════════════════════════════════════════════════════════════
// Families
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyRequest {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<FamilyRequest> for FamilyDetails {
    fn from(request: FamilyRequest) -> Self {
        FamilyDetails {
            name: request.name,
            address: request.address,
            phone: request.phone,
            email: request.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyResponse {
    pub id: FamilyId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Family> for FamilyResponse {
    fn from(family: Family) -> Self {
        Self {
            id: family.id,
            name: family.name,
            address: family.address,
            phone: family.phone,
            email: family.email,
            created_at: family.created_at.as_datetime().to_rfc3339(),
            updated_at: family.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// A family with its members, returned by `GET /families/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDetailResponse {
    #[serde(flatten)]
    pub family: FamilyResponse,
    pub members: Vec<MemberResponse>,
}

impl From<FamilyWithMembers> for FamilyDetailResponse {
    fn from(view: FamilyWithMembers) -> Self {
        Self {
            family: view.family.into(),
            members: view.members.into_iter().map(MemberResponse::from).collect(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Members
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianDto {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<GuardianDto> for Guardian {
    fn from(dto: GuardianDto) -> Self {
        Guardian {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
        }
    }
}

impl From<Guardian> for GuardianDto {
    fn from(guardian: Guardian) -> Self {
        Self {
            first_name: guardian.first_name,
            last_name: guardian.last_name,
            email: guardian.email,
            phone: guardian.phone,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRequest {
    #[serde(default)]
    pub family_id: Option<FamilyId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_minor: bool,
    /// Required when `isMinor` is set.
    #[serde(default)]
    pub guardian: Option<GuardianDto>,
}

impl From<MemberRequest> for MemberDetails {
    fn from(request: MemberRequest) -> Self {
        MemberDetails {
            family_id: request.family_id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            birth_date: request.birth_date,
            is_minor: request.is_minor,
            guardian: request.guardian.map(Guardian::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: MemberId,
    pub family_id: Option<FamilyId>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub is_minor: bool,
    pub guardian: Option<GuardianDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            family_id: member.family_id,
            first_name: member.first_name,
            last_name: member.last_name,
            email: member.email,
            phone: member.phone,
            birth_date: member.birth_date,
            is_minor: member.is_minor,
            guardian: member.guardian.map(GuardianDto::from),
            created_at: member.created_at.as_datetime().to_rfc3339(),
            updated_at: member.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Query string of `GET /members`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberListParams {
    pub search: Option<String>,
    pub family_id: Option<FamilyId>,
}

impl From<MemberListParams> for MemberFilter {
    fn from(params: MemberListParams) -> Self {
        MemberFilter {
            search: params.search.filter(|s| !s.trim().is_empty()),
            family_id: params.family_id,
        }
    }
}
