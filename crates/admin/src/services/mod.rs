//! Service clients and domain policies for the admin API.
//!
//! - [`auth`] - password hashing, strength rules, and the lockout policy
//! - [`media`] - thin HTTP client for the external image host

pub mod auth;
pub mod media;
