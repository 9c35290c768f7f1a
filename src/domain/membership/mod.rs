//! Membership domain module.
//!
//! - `aggregate` - Membership entity (member × season fee)
//! - `status` - MembershipStatus and its derivation from payment totals

mod aggregate;
mod status;

pub use aggregate::Membership;
pub use status::MembershipStatus;
