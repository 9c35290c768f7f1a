//! HTTP adapter for the show ledger.
//!
//! - `GET|POST /api/shows/clients`, `GET|PUT /api/shows/clients/:id`
//! - `GET /api/shows?status=&clientId=`, `POST /api/shows`
//! - `GET /api/shows/upcoming`
//! - `GET|PUT /api/shows/:id`

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::show_routes;
