//! HTTP adapter for registrations.
//!
//! - `POST /api/registrations` - Create with priced workshop lines
//! - `PUT /api/registrations/:id/workshops` - Replace the workshop set
//! - `GET /api/registrations?seasonId=`, `GET|DELETE /api/registrations/:id`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::registration_routes;
