//! Workshops and their per-season price table.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    normalize_optional, require_text, Money, SeasonId, Timestamp, ValidationError, WorkshopId,
};

#[derive(Debug, Clone)]
pub struct WorkshopDetails {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub allow_multiple: bool,
    pub max_per_member: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workshop {
    pub id: WorkshopId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Whether a member may take more than one unit of this workshop.
    pub allow_multiple: bool,
    /// Upper bound on the quantity a member may take, if any.
    pub max_per_member: Option<u32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Workshop {
    pub fn create(details: WorkshopDetails) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        let mut workshop = Self {
            id: WorkshopId::new(),
            name: String::new(),
            description: None,
            is_active: true,
            allow_multiple: false,
            max_per_member: None,
            created_at: now,
            updated_at: now,
        };
        workshop.apply(details)?;
        Ok(workshop)
    }

    pub fn update(&mut self, details: WorkshopDetails) -> Result<(), ValidationError> {
        self.apply(details)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn apply(&mut self, details: WorkshopDetails) -> Result<(), ValidationError> {
        if details.max_per_member == Some(0) {
            return Err(ValidationError::out_of_range(
                "max_per_member",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        self.name = require_text("name", &details.name)?;
        self.description = normalize_optional(details.description);
        self.is_active = details.is_active;
        self.allow_multiple = details.allow_multiple;
        self.max_per_member = details.max_per_member;
        Ok(())
    }

    /// Checks a requested quantity against this workshop's limits.
    ///
    /// Quantities above one need `allow_multiple`; `max_per_member`, when
    /// set, caps the quantity.
    pub fn validate_quantity(&self, quantity: u32) -> Result<(), ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::out_of_range("quantity", 1, i64::from(u32::MAX), 0));
        }
        if quantity > 1 && !self.allow_multiple {
            return Err(ValidationError::invalid_format(
                "quantity",
                format!("workshop '{}' does not allow multiple registrations", self.name),
            ));
        }
        if let Some(max) = self.max_per_member {
            if quantity > max {
                return Err(ValidationError::out_of_range(
                    "quantity",
                    1,
                    i64::from(max),
                    i64::from(quantity),
                ));
            }
        }
        Ok(())
    }
}

/// Undiscounted unit price of a workshop for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopPrice {
    pub workshop_id: WorkshopId,
    pub season_id: SeasonId,
    pub amount: Money,
}

impl WorkshopPrice {
    pub fn new(
        workshop_id: WorkshopId,
        season_id: SeasonId,
        amount: Money,
    ) -> Result<Self, ValidationError> {
        amount.ensure_non_negative("amount")?;
        Ok(Self {
            workshop_id,
            season_id,
            amount,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn workshop(allow_multiple: bool, max_per_member: Option<u32>) -> Workshop {
        Workshop::create(WorkshopDetails {
            name: "Pottery".to_string(),
            description: None,
            is_active: true,
            allow_multiple,
            max_per_member,
        })
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::workshop;
    use super::*;

    #[test]
    fn single_unit_always_allowed() {
        assert!(workshop(false, None).validate_quantity(1).is_ok());
    }

    #[test]
    fn zero_quantity_rejected() {
        assert!(workshop(true, None).validate_quantity(0).is_err());
    }

    #[test]
    fn multiple_units_need_allow_multiple() {
        assert!(matches!(
            workshop(false, None).validate_quantity(2),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(workshop(true, None).validate_quantity(2).is_ok());
    }

    #[test]
    fn quantity_capped_by_max_per_member() {
        let w = workshop(true, Some(2));
        assert!(w.validate_quantity(2).is_ok());
        assert!(matches!(
            w.validate_quantity(3),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn max_per_member_of_zero_rejected() {
        let result = Workshop::create(WorkshopDetails {
            name: "Choir".to_string(),
            description: None,
            is_active: true,
            allow_multiple: true,
            max_per_member: Some(0),
        });
        assert!(result.is_err());
    }

    #[test]
    fn price_must_not_be_negative() {
        let w = workshop(false, None);
        assert!(WorkshopPrice::new(w.id, SeasonId::new(), -Money::from_units(5)).is_err());
        assert!(WorkshopPrice::new(w.id, SeasonId::new(), Money::ZERO).is_ok());
    }
}
