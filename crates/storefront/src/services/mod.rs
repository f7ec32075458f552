//! Outbound service clients.

pub mod email;
