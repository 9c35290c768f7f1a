//! HTTP adapter for seasons.
//!
//! - `GET /api/seasons` - List seasons, newest first
//! - `POST /api/seasons` - Create a season
//! - `GET /api/seasons/active` - The active season
//! - `GET /api/seasons/:id` - Get a season
//! - `PUT /api/seasons/:id` - Update a season
//! - `POST /api/seasons/:id/activate` - Make a season the active one

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::season_routes;
