//! Auric Core - Shared domain types.
//!
//! This crate provides common types used across all Auric components:
//! - `storefront` - Public catalog and contact API
//! - `admin` - Staff back-office API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain rules - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers, status enums, and the catalog domain model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
