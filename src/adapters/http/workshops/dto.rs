//! Request and response bodies for workshop endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::workshop::WorkshopWithPrices;
use crate::domain::foundation::{Money, SeasonId, WorkshopId};
use crate::domain::workshop::{Workshop, WorkshopDetails, WorkshopPrice};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub allow_multiple: bool,
    #[serde(default)]
    pub max_per_member: Option<u32>,
}

impl From<WorkshopRequest> for WorkshopDetails {
    fn from(request: WorkshopRequest) -> Self {
        WorkshopDetails {
            name: request.name,
            description: request.description,
            is_active: request.is_active,
            allow_multiple: request.allow_multiple,
            max_per_member: request.max_per_member,
        }
    }
}

/// Body of `PUT /workshops/:id/price`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopPriceRequest {
    pub season_id: SeasonId,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopResponse {
    pub id: WorkshopId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub allow_multiple: bool,
    pub max_per_member: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Workshop> for WorkshopResponse {
    fn from(workshop: Workshop) -> Self {
        Self {
            id: workshop.id,
            name: workshop.name,
            description: workshop.description,
            is_active: workshop.is_active,
            allow_multiple: workshop.allow_multiple,
            max_per_member: workshop.max_per_member,
            created_at: workshop.created_at.as_datetime().to_rfc3339(),
            updated_at: workshop.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopPriceResponse {
    pub workshop_id: WorkshopId,
    pub season_id: SeasonId,
    pub amount: Money,
}

impl From<WorkshopPrice> for WorkshopPriceResponse {
    fn from(price: WorkshopPrice) -> Self {
        Self {
            workshop_id: price.workshop_id,
            season_id: price.season_id,
            amount: price.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopDetailResponse {
    #[serde(flatten)]
    pub workshop: WorkshopResponse,
    pub prices: Vec<WorkshopPriceResponse>,
}

impl From<WorkshopWithPrices> for WorkshopDetailResponse {
    fn from(view: WorkshopWithPrices) -> Self {
        Self {
            workshop: view.workshop.into(),
            prices: view
                .prices
                .into_iter()
                .map(WorkshopPriceResponse::from)
                .collect(),
        }
    }
}

/// Query string of `GET /workshops`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopListParams {
    #[serde(default)]
    pub active_only: bool,
    pub season_id: Option<SeasonId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workshop_defaults_to_active_single_unit() {
        let request: WorkshopRequest =
            serde_json::from_value(serde_json::json!({"name": "Pottery"})).unwrap();
        let details = WorkshopDetails::from(request);
        assert!(details.is_active);
        assert!(!details.allow_multiple);
        assert!(details.max_per_member.is_none());
    }
}
