//! HTTP middleware for the storefront.

pub mod maintenance;
pub mod rate_limit;
