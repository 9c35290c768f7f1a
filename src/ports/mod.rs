//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports
//! (PostgreSQL for production, an in-memory store for tests).
//!
//! ## Repositories (write side)
//!
//! - `SeasonRepository`, `FamilyRepository`, `MemberRepository`
//! - `WorkshopRepository` - workshops and the per-season price table
//! - `MembershipRepository`, `RegistrationRepository`
//! - `PaymentRepository` - payments plus their reconciliation writes
//! - `ShowRepository` - show clients and bookings
//!
//! ## Readers
//!
//! - `SettlementReader` - dues and payments of a family or member

mod family_repository;
mod membership_repository;
mod payment_repository;
mod registration_repository;
mod season_repository;
mod settlement_reader;
mod show_repository;
mod workshop_repository;

pub use family_repository::{FamilyRepository, MemberFilter, MemberRepository};
pub use membership_repository::{MembershipFilter, MembershipRepository};
pub use payment_repository::{PaymentFilter, PaymentRepository};
pub use registration_repository::RegistrationRepository;
pub use season_repository::SeasonRepository;
pub use settlement_reader::SettlementReader;
pub use show_repository::{ShowFilter, ShowRepository};
pub use workshop_repository::{WorkshopFilter, WorkshopRepository};
