//! Request and response bodies for registration endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::registration::WorkshopQuantity;
use crate::domain::foundation::{
    MemberId, Money, Percentage, RegistrationId, SeasonId, ValidationError, WorkshopId,
    WorkshopRegistrationId,
};
use crate::domain::registration::{FamilyOrder, Registration, WorkshopRegistration};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopQuantityDto {
    pub workshop_id: WorkshopId,
    pub quantity: u32,
}

impl From<WorkshopQuantityDto> for WorkshopQuantity {
    fn from(dto: WorkshopQuantityDto) -> Self {
        WorkshopQuantity {
            workshop_id: dto.workshop_id,
            quantity: dto.quantity,
        }
    }
}

fn quantities(dtos: Vec<WorkshopQuantityDto>) -> Vec<WorkshopQuantity> {
    dtos.into_iter().map(WorkshopQuantity::from).collect()
}

fn family_order(value: Option<i64>) -> Result<Option<FamilyOrder>, ValidationError> {
    value.map(FamilyOrder::try_new).transpose()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub member_id: MemberId,
    pub season_id: SeasonId,
    pub workshop_quantities: Vec<WorkshopQuantityDto>,
    /// Rank among registering siblings; 1 when omitted.
    #[serde(default)]
    pub family_order: Option<i64>,
    #[serde(default)]
    pub registration_date: Option<NaiveDate>,
}

impl CreateRegistrationRequest {
    pub fn family_order(&self) -> Result<FamilyOrder, ValidationError> {
        Ok(family_order(self.family_order)?.unwrap_or_default())
    }

    pub fn workshops(self) -> Vec<WorkshopQuantity> {
        quantities(self.workshop_quantities)
    }
}

/// Body of `PUT /registrations/:id/workshops`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceWorkshopsRequest {
    pub workshop_quantities: Vec<WorkshopQuantityDto>,
    /// Keeps the stored order when omitted.
    #[serde(default)]
    pub family_order: Option<i64>,
}

impl ReplaceWorkshopsRequest {
    pub fn family_order(&self) -> Result<Option<FamilyOrder>, ValidationError> {
        family_order(self.family_order)
    }

    pub fn workshops(self) -> Vec<WorkshopQuantity> {
        quantities(self.workshop_quantities)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopLineResponse {
    pub id: WorkshopRegistrationId,
    pub workshop_id: WorkshopId,
    pub quantity: u32,
    /// Unit price after discount, as priced when the line was written.
    pub applied_price: Money,
    pub discount_percent: Percentage,
    pub line_total: Money,
}

impl From<WorkshopRegistration> for WorkshopLineResponse {
    fn from(line: WorkshopRegistration) -> Self {
        Self {
            line_total: line.line_total(),
            id: line.id,
            workshop_id: line.workshop_id,
            quantity: line.quantity,
            applied_price: line.applied_price,
            discount_percent: line.discount_percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: RegistrationId,
    pub member_id: MemberId,
    pub season_id: SeasonId,
    pub family_order: FamilyOrder,
    pub registration_date: NaiveDate,
    pub total_amount: Money,
    pub workshops: Vec<WorkshopLineResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            total_amount: registration.total_amount(),
            id: registration.id,
            member_id: registration.member_id,
            season_id: registration.season_id,
            family_order: registration.family_order,
            registration_date: registration.registration_date,
            workshops: registration
                .lines
                .into_iter()
                .map(WorkshopLineResponse::from)
                .collect(),
            created_at: registration.created_at.as_datetime().to_rfc3339(),
            updated_at: registration.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Query string of `GET /registrations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationListParams {
    pub season_id: Option<SeasonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_order_defaults_to_first() {
        let request: CreateRegistrationRequest = serde_json::from_value(serde_json::json!({
            "memberId": uuid::Uuid::new_v4(),
            "seasonId": uuid::Uuid::new_v4(),
            "workshopQuantities": []
        }))
        .unwrap();
        assert_eq!(request.family_order().unwrap(), FamilyOrder::FIRST);
    }

    #[test]
    fn zero_family_order_is_out_of_range() {
        let request = ReplaceWorkshopsRequest {
            workshop_quantities: vec![],
            family_order: Some(0),
        };
        assert!(matches!(
            request.family_order(),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
