//! HTTP adapter for families and their members.
//!
//! - `GET|POST /api/families`, `GET|PUT /api/families/:id`
//! - `GET /api/members?search=&familyId=`, `POST /api/members`,
//!   `GET|PUT /api/members/:id`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{family_routes, member_routes};
