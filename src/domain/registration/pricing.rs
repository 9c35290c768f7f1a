//! Workshop price and sibling-discount calculation.
//!
//! A line gets the season discount only when the member is a sibling
//! (`family_order > 1`) and holds a pending or validated membership for
//! the season. The applied unit price is `base × (1 − discount/100)`,
//! rounded to cents.

use super::{FamilyOrder, WorkshopRegistration};
use crate::domain::foundation::{Money, Percentage, ValidationError, WorkshopRegistrationId};
use crate::domain::workshop::Workshop;

/// Facts about the member and season that decide the discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingContext {
    pub season_discount: Percentage,
    pub family_order: FamilyOrder,
    /// A pending or validated membership exists for (member, season).
    pub has_live_membership: bool,
}

/// Result of pricing one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub applied_price: Money,
    pub discount_percent: Percentage,
}

impl PricingContext {
    pub fn discount_eligible(&self) -> bool {
        self.family_order.is_sibling() && self.has_live_membership
    }

    pub fn applicable_discount(&self) -> Percentage {
        if self.discount_eligible() {
            self.season_discount
        } else {
            Percentage::ZERO
        }
    }

    pub fn quote(&self, base_price: Money) -> PriceQuote {
        let discount_percent = self.applicable_discount();
        PriceQuote {
            applied_price: base_price.discounted(discount_percent),
            discount_percent,
        }
    }

    /// Validates the quantity against the workshop and prices the line.
    pub fn price_line(
        &self,
        workshop: &Workshop,
        base_price: Money,
        quantity: u32,
    ) -> Result<WorkshopRegistration, ValidationError> {
        workshop.validate_quantity(quantity)?;
        let quote = self.quote(base_price);
        Ok(WorkshopRegistration {
            id: WorkshopRegistrationId::new(),
            workshop_id: workshop.id,
            quantity,
            applied_price: quote.applied_price,
            discount_percent: quote.discount_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workshop::test_support::workshop;
    use proptest::prelude::*;

    fn ctx(discount: i64, order: i64, membership: bool) -> PricingContext {
        PricingContext {
            season_discount: Percentage::try_new(discount).unwrap(),
            family_order: FamilyOrder::try_new(order).unwrap(),
            has_live_membership: membership,
        }
    }

    #[test]
    fn sibling_with_membership_gets_season_discount() {
        let quote = ctx(10, 2, true).quote(Money::from_units(100));
        assert_eq!(quote.applied_price, Money::from_units(90));
        assert_eq!(quote.discount_percent.value(), 10);
    }

    #[test]
    fn sibling_without_membership_pays_full_price() {
        let quote = ctx(10, 2, false).quote(Money::from_units(100));
        assert_eq!(quote.applied_price, Money::from_units(100));
        assert_eq!(quote.discount_percent, Percentage::ZERO);
    }

    #[test]
    fn first_registrant_pays_full_price() {
        let quote = ctx(10, 1, true).quote(Money::from_units(100));
        assert_eq!(quote.applied_price, Money::from_units(100));
    }

    #[test]
    fn price_line_snapshots_quote() {
        let w = workshop(true, Some(2));
        let line = ctx(10, 3, true).price_line(&w, Money::from_units(80), 2).unwrap();
        assert_eq!(line.workshop_id, w.id);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.applied_price, Money::from_units(72));
        assert_eq!(line.discount_percent.value(), 10);
    }

    #[test]
    fn price_line_enforces_max_per_member() {
        let w = workshop(true, Some(2));
        assert!(ctx(10, 1, false).price_line(&w, Money::from_units(80), 3).is_err());
    }

    #[test]
    fn price_line_enforces_allow_multiple() {
        let w = workshop(false, None);
        assert!(ctx(0, 1, false).price_line(&w, Money::from_units(80), 2).is_err());
    }

    proptest! {
        #[test]
        fn first_registrant_never_discounted(
            discount in 0i64..=100,
            membership in any::<bool>(),
            cents in 0i64..1_000_000,
        ) {
            let base = Money::new(rust_decimal::Decimal::new(cents, 2));
            let quote = ctx(discount, 1, membership).quote(base);
            prop_assert_eq!(quote.discount_percent, Percentage::ZERO);
            prop_assert_eq!(quote.applied_price, base);
        }

        #[test]
        fn sibling_discount_follows_membership(
            discount in 0i64..=100,
            order in 2i64..10,
            membership in any::<bool>(),
        ) {
            let quote = ctx(discount, order, membership).quote(Money::from_units(100));
            let expected = if membership { discount } else { 0 };
            prop_assert_eq!(i64::from(quote.discount_percent.value()), expected);
        }
    }
}
