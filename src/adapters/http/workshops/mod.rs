//! HTTP adapter for workshops and their season prices.
//!
//! - `GET /api/workshops?activeOnly=&seasonId=`
//! - `POST /api/workshops`
//! - `GET /api/workshops/:id` - Workshop with its price table
//! - `PUT /api/workshops/:id`
//! - `PUT /api/workshops/:id/price` - Upsert the price for a season

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::workshop_routes;
