//! Middleware for the admin API.
//!
//! - [`session`] - `PostgreSQL`-backed session layer
//! - [`auth`] - extractors gating handlers on a logged-in staff session

pub mod auth;
pub mod session;
