//! Season aggregate.
//!
//! A season is one school year. It carries the yearly membership fee, the
//! sibling discount applied to workshop prices, and the running total of
//! donations collected from overpayments. At most one season is active.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    require_text, Money, Percentage, SeasonId, Timestamp, ValidationError,
};

/// Writable attributes of a season.
#[derive(Debug, Clone)]
pub struct SeasonDetails {
    pub start_year: i32,
    pub end_year: i32,
    pub label: String,
    pub membership_amount: Money,
    pub discount_percent: Percentage,
    pub is_active: bool,
}

impl SeasonDetails {
    fn validate(self) -> Result<Self, ValidationError> {
        let label = require_text("label", &self.label)?;
        if self.end_year < self.start_year {
            return Err(ValidationError::invalid_format(
                "end_year",
                format!("{} precedes start year {}", self.end_year, self.start_year),
            ));
        }
        self.membership_amount.ensure_non_negative("membership_amount")?;
        Ok(Self { label, ..self })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub start_year: i32,
    pub end_year: i32,
    pub label: String,
    pub membership_amount: Money,
    pub discount_percent: Percentage,
    pub is_active: bool,
    pub total_donations: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Season {
    pub fn create(details: SeasonDetails) -> Result<Self, ValidationError> {
        let details = details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id: SeasonId::new(),
            start_year: details.start_year,
            end_year: details.end_year,
            label: details.label,
            membership_amount: details.membership_amount,
            discount_percent: details.discount_percent,
            is_active: details.is_active,
            total_donations: Money::ZERO,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the writable attributes. Donations are left untouched.
    pub fn update(&mut self, details: SeasonDetails) -> Result<(), ValidationError> {
        let details = details.validate()?;
        self.start_year = details.start_year;
        self.end_year = details.end_year;
        self.label = details.label;
        self.membership_amount = details.membership_amount;
        self.discount_percent = details.discount_percent;
        self.is_active = details.is_active;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn details(&self) -> SeasonDetails {
        SeasonDetails {
            start_year: self.start_year,
            end_year: self.end_year,
            label: self.label.clone(),
            membership_amount: self.membership_amount,
            discount_percent: self.discount_percent,
            is_active: self.is_active,
        }
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn season_details(discount: i64) -> SeasonDetails {
        SeasonDetails {
            start_year: 2024,
            end_year: 2025,
            label: "2024-2025".to_string(),
            membership_amount: Money::from_units(50),
            discount_percent: Percentage::try_new(discount).unwrap(),
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::season_details;
    use super::*;

    #[test]
    fn create_starts_without_donations() {
        let season = Season::create(season_details(10)).unwrap();
        assert_eq!(season.total_donations, Money::ZERO);
        assert_eq!(season.discount_percent.value(), 10);
        assert!(season.is_active);
    }

    #[test]
    fn create_trims_label() {
        let mut details = season_details(0);
        details.label = "  2024/25 ".to_string();
        assert_eq!(Season::create(details).unwrap().label, "2024/25");
    }

    #[test]
    fn create_rejects_blank_label() {
        let mut details = season_details(0);
        details.label = "   ".to_string();
        assert!(matches!(
            Season::create(details),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn create_rejects_inverted_years() {
        let mut details = season_details(0);
        details.end_year = 2023;
        assert!(Season::create(details).is_err());
    }

    #[test]
    fn create_rejects_negative_membership_amount() {
        let mut details = season_details(0);
        details.membership_amount = -Money::from_units(1);
        assert!(Season::create(details).is_err());
    }

    #[test]
    fn update_keeps_donations() {
        let mut season = Season::create(season_details(10)).unwrap();
        season.total_donations = Money::from_units(50);

        let mut details = season.details();
        details.discount_percent = Percentage::try_new(20).unwrap();
        season.update(details).unwrap();

        assert_eq!(season.discount_percent.value(), 20);
        assert_eq!(season.total_donations, Money::from_units(50));
    }
}
