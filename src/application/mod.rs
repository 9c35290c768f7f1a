//! Application layer - Commands, Queries, and Handlers.
//!
//! Handlers orchestrate domain operations over the ports: they load what
//! a rule needs, let the domain compute, then hand the result to a single
//! repository call that persists it atomically.

pub mod handlers;
