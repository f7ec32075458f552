//! Shared fixtures for Auric's cross-crate business-rule tests.
//!
//! These tests exercise rules whose pieces live in different crates (core
//! validation feeding storefront catalog transforms, admin auth policy
//! feeding the account model) without a database or network. The audit-trail
//! tests are the exception: they hit a scratch Postgres and stay ignored
//! unless `TEST_DATABASE_URL` points at one. End-to-end API tests against
//! running servers live outside the workspace.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use auric_core::{Product, ProductCategory, ProductDraft, ProductId, ProductImage};

/// A single valid image at the given position.
#[must_use]
pub fn image(position: i32, featured: bool) -> ProductImage {
    ProductImage {
        url: format!("https://img.auricjewelry.co/{position}.jpg"),
        asset_id: format!("asset-{position}"),
        position,
        featured,
    }
}

/// A valid draft for a plain gold ring.
#[must_use]
pub fn ring_draft() -> ProductDraft {
    ProductDraft {
        sku: "AUR-RING-100".to_owned(),
        title: "Band Ring".to_owned(),
        description: "Plain 14k gold band.".to_owned(),
        price: Decimal::from(450),
        discount_price: None,
        category: ProductCategory::Rings,
        material: "14k gold".to_owned(),
        in_stock: true,
        stock_quantity: 5,
        is_new: false,
        is_featured: false,
        popularity: 50,
        tags: vec!["band".to_owned()],
        rating: None,
        images: vec![image(0, false)],
    }
}

/// Materialize a validated draft into a persisted-shaped product.
///
/// Mirrors what the create path does: version 1 and server-assigned IDs.
#[must_use]
pub fn materialize(id: i32, mut draft: ProductDraft) -> Product {
    draft.validate().expect("fixture draft must be valid");
    let ts = Utc
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("valid timestamp")
        + chrono::Duration::days(i64::from(id));

    Product {
        id: ProductId::new(id),
        external_id: Uuid::new_v4(),
        sku: draft.sku,
        title: draft.title,
        description: draft.description,
        price: draft.price,
        discount_price: draft.discount_price,
        category: draft.category,
        material: draft.material,
        in_stock: draft.in_stock,
        stock_quantity: draft.stock_quantity,
        is_new: draft.is_new,
        is_featured: draft.is_featured,
        popularity: draft.popularity,
        rating: draft.rating,
        tags: draft.tags,
        images: draft.images,
        version: 1,
        created_at: ts,
        updated_at: ts,
    }
}
