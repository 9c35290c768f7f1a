//! Registration handlers.
//!
//! ## Commands
//! - Create a registration with priced workshop lines
//! - Replace a registration's workshop set
//! - Delete a registration
//!
//! ## Queries
//! - Get / list registrations
//!
//! `RegistrationPricer` and `RegistrationRepricer` are shared with the
//! membership handlers.

mod create_registration;
mod pricing;
mod queries;
mod replace_workshops;
mod reprice;

pub use create_registration::{CreateRegistrationCommand, CreateRegistrationHandler};
pub use pricing::{RegistrationPricer, WorkshopQuantity};
pub use queries::{DeleteRegistrationHandler, GetRegistrationHandler, ListRegistrationsHandler};
pub use replace_workshops::{ReplaceWorkshopsCommand, ReplaceWorkshopsHandler};
pub use reprice::RegistrationRepricer;
