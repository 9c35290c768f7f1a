//! Registration aggregate and its workshop lines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{
    MemberId, Money, Percentage, RegistrationId, SeasonId, Timestamp, ValidationError, WorkshopId,
    WorkshopRegistrationId,
};

/// Rank of a member among the siblings of a family registering in a season.
///
/// `1` is the first (full-price) registrant; anything above is a sibling
/// that may receive the season discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct FamilyOrder(u32);

impl FamilyOrder {
    pub const FIRST: Self = Self(1);

    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if value < 1 || value > i64::from(u32::MAX) {
            return Err(ValidationError::out_of_range(
                "family_order",
                1,
                i64::from(u32::MAX),
                value,
            ));
        }
        Ok(Self(value as u32))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// True for every registrant after the first.
    pub fn is_sibling(&self) -> bool {
        self.0 > 1
    }
}

impl Default for FamilyOrder {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<i64> for FamilyOrder {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<FamilyOrder> for u32 {
    fn from(order: FamilyOrder) -> Self {
        order.0
    }
}

/// One priced workshop line of a registration.
///
/// `applied_price` and `discount_percent` are snapshots taken when the line
/// was priced; later edits to the price table do not touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopRegistration {
    pub id: WorkshopRegistrationId,
    pub workshop_id: WorkshopId,
    pub quantity: u32,
    /// Unit price after discount.
    pub applied_price: Money,
    pub discount_percent: Percentage,
}

impl WorkshopRegistration {
    pub fn line_total(&self) -> Money {
        self.applied_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub member_id: MemberId,
    pub season_id: SeasonId,
    pub family_order: FamilyOrder,
    pub registration_date: NaiveDate,
    pub lines: Vec<WorkshopRegistration>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Registration {
    pub fn create(
        member_id: MemberId,
        season_id: SeasonId,
        family_order: FamilyOrder,
        registration_date: NaiveDate,
        lines: Vec<WorkshopRegistration>,
    ) -> Result<Self, ValidationError> {
        ensure_distinct_workshops(&lines)?;
        let now = Timestamp::now();
        Ok(Self {
            id: RegistrationId::new(),
            member_id,
            season_id,
            family_order,
            registration_date,
            lines,
            created_at: now,
            updated_at: now,
        })
    }

    /// Swaps the whole line set, and the family order when given.
    pub fn replace_lines(
        &mut self,
        lines: Vec<WorkshopRegistration>,
        family_order: Option<FamilyOrder>,
    ) -> Result<(), ValidationError> {
        ensure_distinct_workshops(&lines)?;
        if let Some(order) = family_order {
            self.family_order = order;
        }
        self.lines = lines;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Sum of every line's applied unit price times its quantity.
    pub fn total_amount(&self) -> Money {
        self.lines.iter().map(WorkshopRegistration::line_total).sum()
    }

    pub fn workshop_ids(&self) -> Vec<WorkshopId> {
        self.lines.iter().map(|l| l.workshop_id).collect()
    }
}

fn ensure_distinct_workshops(lines: &[WorkshopRegistration]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for line in lines {
        if !seen.insert(line.workshop_id) {
            return Err(ValidationError::invalid_format(
                "workshop_quantities",
                format!("workshop {} is listed more than once", line.workshop_id),
            ));
        }
    }
    Ok(())
}
