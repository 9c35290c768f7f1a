//! Money value object backed by fixed-point decimals.
//!
//! Every amount is held at cent precision: construction rounds half away
//! from zero to two decimal places, and all arithmetic stays in `Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub};

use super::{Percentage, ValidationError};

/// Decimal places kept for monetary values.
const DECIMAL_PLACES: u32 = 2;

/// Largest stored amount, the range of a `NUMERIC(12, 2)` column.
const MAX_CENTS: i64 = 999_999_999_999;

/// An amount of money in the association's currency.
///
/// May be negative (a balance in credit); callers that need a positive or
/// non-negative amount validate with [`Money::ensure_positive`] or
/// [`Money::ensure_non_negative`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest amount accepted on input.
    pub const MAX: Self = Self(Decimal::from_parts(
        MAX_CENTS as u32,
        (MAX_CENTS >> 32) as u32,
        0,
        false,
        DECIMAL_PLACES,
    ));

    /// Creates an amount, rounded to cents.
    pub fn new(amount: Decimal) -> Self {
        let mut rounded =
            amount.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DECIMAL_PLACES);
        Self(rounded)
    }

    /// Creates an amount from a whole number of currency units.
    pub fn from_units(units: i64) -> Self {
        Self::new(Decimal::from(units))
    }

    /// Returns the decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Applies a percentage reduction: `self × (1 − pct/100)`, rounded to cents.
    pub fn discounted(&self, discount: Percentage) -> Money {
        Money::new(self.0 * (Decimal::ONE - discount.as_fraction()))
    }

    /// Multiplies a unit price by a quantity.
    pub fn times(&self, quantity: u32) -> Money {
        Money::new(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Returns how much `self` exceeds `other`, never negative.
    pub fn surplus_over(&self, other: Money) -> Money {
        if self.0 > other.0 {
            Money::new(self.0.saturating_sub(other.0))
        } else {
            Money::ZERO
        }
    }

    /// Fails unless the amount is strictly greater than zero and storable.
    pub fn ensure_positive(&self, field: &str) -> Result<(), ValidationError> {
        if !self.is_positive() {
            return Err(ValidationError::invalid_format(
                field,
                format!("must be greater than zero, got {}", self),
            ));
        }
        self.ensure_storable(field)
    }

    /// Fails if the amount is below zero or not storable.
    pub fn ensure_non_negative(&self, field: &str) -> Result<(), ValidationError> {
        if self.0 < Decimal::ZERO {
            return Err(ValidationError::invalid_format(
                field,
                format!("must not be negative, got {}", self),
            ));
        }
        self.ensure_storable(field)
    }

    fn ensure_storable(&self, field: &str) -> Result<(), ValidationError> {
        if *self > Money::MAX {
            return Err(ValidationError::invalid_format(
                field,
                format!("must not exceed {}, got {}", Money::MAX, self),
            ));
        }
        Ok(())
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::new(amount)
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturates at the `Decimal` bounds.
    fn add(self, rhs: Money) -> Money {
        Money::new(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money::new(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::new(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(DECIMAL_PLACES);
        write!(f, "{}", value)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut value = self.0;
        value.rescale(DECIMAL_PLACES);
        Serialize::serialize(&value, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(Money::new)
    }
}
