//! Domain layer - entities, value objects and the pricing/settlement rules.
//!
//! Nothing here performs I/O.

pub mod family;
pub mod foundation;
pub mod membership;
pub mod payment;
pub mod registration;
pub mod season;
pub mod settlement;
pub mod show;
pub mod workshop;
