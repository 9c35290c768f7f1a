//! Request and response bodies for season endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, Percentage, SeasonId, ValidationError};
use crate::domain::season::{Season, SeasonDetails};

/// Body of `POST /seasons` and `PUT /seasons/:id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonRequest {
    pub start_year: i32,
    pub end_year: i32,
    pub label: String,
    pub membership_amount: Money,
    /// Sibling discount, 0 to 100.
    #[serde(default)]
    pub discount_percent: i64,
    #[serde(default)]
    pub is_active: bool,
}

impl TryFrom<SeasonRequest> for SeasonDetails {
    type Error = ValidationError;

    fn try_from(request: SeasonRequest) -> Result<Self, Self::Error> {
        Ok(SeasonDetails {
            start_year: request.start_year,
            end_year: request.end_year,
            label: request.label,
            membership_amount: request.membership_amount,
            discount_percent: Percentage::try_new(request.discount_percent)?,
            is_active: request.is_active,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonResponse {
    pub id: SeasonId,
    pub start_year: i32,
    pub end_year: i32,
    pub label: String,
    pub membership_amount: Money,
    pub discount_percent: Percentage,
    pub is_active: bool,
    /// Running total of overpayments; read-only.
    pub total_donations: Money,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Season> for SeasonResponse {
    fn from(season: Season) -> Self {
        Self {
            id: season.id,
            start_year: season.start_year,
            end_year: season.end_year,
            label: season.label,
            membership_amount: season.membership_amount,
            discount_percent: season.discount_percent,
            is_active: season.is_active,
            total_donations: season.total_donations,
            created_at: season.created_at.as_datetime().to_rfc3339(),
            updated_at: season.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(discount_percent: i64) -> SeasonRequest {
        SeasonRequest {
            start_year: 2024,
            end_year: 2025,
            label: "2024-2025".to_string(),
            membership_amount: Money::from_units(50),
            discount_percent,
            is_active: false,
        }
    }

    #[test]
    fn out_of_range_discount_is_rejected() {
        assert!(matches!(
            SeasonDetails::try_from(request(120)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            SeasonDetails::try_from(request(10)).unwrap().discount_percent.value(),
            10
        );
    }

    #[test]
    fn request_accepts_camel_case_and_numeric_amount() {
        let request: SeasonRequest = serde_json::from_value(serde_json::json!({
            "startYear": 2024,
            "endYear": 2025,
            "label": "2024-2025",
            "membershipAmount": 50,
            "discountPercent": 10
        }))
        .unwrap();
        assert_eq!(request.membership_amount, Money::from_units(50));
        assert!(!request.is_active);
    }
}
