//! Registration domain module.
//!
//! - `aggregate` - Registration (member × season) with its workshop lines
//! - `pricing` - Unit price and sibling discount for a workshop line

mod aggregate;
mod pricing;

pub use aggregate::{FamilyOrder, Registration, WorkshopRegistration};
pub use pricing::{PriceQuote, PricingContext};
