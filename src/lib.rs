//! Asso Ledger - Back-office for an arts association
//!
//! This crate manages families, members, seasons, workshop enrollments,
//! memberships and payments. Its core is the pricing and settlement engine:
//! sibling discounts on workshop registrations, and the due/paid/balance
//! computation that drives membership status.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
