//! HTTP adapter for memberships.
//!
//! - `GET /api/memberships?memberId=&seasonId=`
//! - `POST /api/memberships` - Status starts `pending`
//! - `GET|PUT|DELETE /api/memberships/:id`
//! - `POST /api/memberships/:id/cancel`
//!
//! Every mutation reprices the member's registration for the season.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::membership_routes;
