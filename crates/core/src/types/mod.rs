//! Core types for Auric.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod settings;
pub mod slug;
pub mod status;
pub mod submission;

pub use category::Category;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{PriceError, discount_percent, effective_price, validate_discount};
pub use product::{
    FieldError, Product, ProductDraft, ProductImage, ProductRuleError, normalize_featured_image,
};
pub use settings::{PromoBanner, SeoMetadata, SiteSettings, SocialLinks};
pub use slug::{Slug, SlugError};
pub use status::*;
pub use submission::ContactSubmission;
