//! Product domain model and validation rules.
//!
//! The invariants enforced here back the catalog's audit trail:
//!
//! - a product carries between 1 and 5 images, exactly one of them featured
//!   (defaulted to the first when none is marked)
//! - a discount price, when present, is strictly below the list price
//! - every persisted mutation carries a monotonically incrementing version
//!
//! Validation is pure and produces per-field errors so API callers can show
//! structured feedback.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::ProductId;
use super::price::{self, PriceError};
use super::status::ProductCategory;

/// Minimum number of images per product.
pub const MIN_IMAGES: usize = 1;
/// Maximum number of images per product.
pub const MAX_IMAGES: usize = 5;
/// Maximum title length.
pub const MAX_TITLE_LENGTH: usize = 200;
/// Maximum SKU length.
pub const MAX_SKU_LENGTH: usize = 64;

/// A hosted product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Public URL served to shoppers.
    pub url: String,
    /// Asset ID at the media host, used for deletion.
    pub asset_id: String,
    /// Display order, 0-based.
    pub position: i32,
    /// Whether this is the product's featured image.
    pub featured: bool,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Database primary key.
    pub id: ProductId,
    /// Stable external identifier exposed through the API.
    pub external_id: Uuid,
    /// Stock keeping unit, unique per product.
    pub sku: String,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// List price.
    pub price: Decimal,
    /// Discounted price, strictly below `price` when present.
    pub discount_price: Option<Decimal>,
    /// Catalog grouping.
    pub category: ProductCategory,
    /// Primary material (e.g. "14k gold", "sterling silver").
    pub material: String,
    /// Whether the product is purchasable.
    pub in_stock: bool,
    /// Units on hand.
    pub stock_quantity: i32,
    /// New-arrival flag.
    pub is_new: bool,
    /// Featured-on-homepage flag.
    pub is_featured: bool,
    /// Popularity score used for default catalog ordering.
    pub popularity: i32,
    /// Average rating, 1-5, when the product has reviews.
    pub rating: Option<Decimal>,
    /// Free-form search tags.
    pub tags: Vec<String>,
    /// Hosted images, 1-5 entries, exactly one featured.
    pub images: Vec<ProductImage>,
    /// Monotonically incrementing version; bumped on every mutation.
    pub version: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The price a shopper pays: discount price when set, list price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        price::effective_price(self.price, self.discount_price)
    }

    /// Derived discount percentage, when discounted.
    #[must_use]
    pub fn discount_percent(&self) -> Option<Decimal> {
        price::discount_percent(self.price, self.discount_price)
    }

    /// The image marked as featured.
    ///
    /// Persisted products always have exactly one; this still degrades to the
    /// first image rather than panicking on unvalidated data.
    #[must_use]
    pub fn featured_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|i| i.featured)
            .or_else(|| self.images.first())
    }
}

/// Incoming product fields for create/update, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Stock keeping unit.
    pub sku: String,
    /// Display title.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// List price.
    pub price: Decimal,
    /// Discounted price, must undercut `price`.
    #[serde(default)]
    pub discount_price: Option<Decimal>,
    /// Catalog grouping.
    pub category: ProductCategory,
    /// Primary material.
    pub material: String,
    /// Whether the product is purchasable.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Units on hand.
    #[serde(default)]
    pub stock_quantity: i32,
    /// New-arrival flag.
    #[serde(default)]
    pub is_new: bool,
    /// Featured-on-homepage flag.
    #[serde(default)]
    pub is_featured: bool,
    /// Popularity score.
    #[serde(default)]
    pub popularity: i32,
    /// Average rating, 1-5.
    #[serde(default)]
    pub rating: Option<Decimal>,
    /// Free-form search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Hosted images.
    pub images: Vec<ProductImage>,
}

const fn default_in_stock() -> bool {
    true
}

/// A single validation failure, attributed to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field, in the API's snake_case form.
    pub field: &'static str,
    /// Human-readable description of the failure.
    pub message: String,
}

/// Product validation failure carrying per-field details.
#[derive(thiserror::Error, Debug, Clone)]
#[error("product validation failed: {}", summarize(.0))]
pub struct ProductRuleError(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ProductDraft {
    /// Validate the draft and normalize its images.
    ///
    /// On success the draft's images are reordered by position and exactly one
    /// is marked featured (defaulting to the first when none was marked).
    ///
    /// # Errors
    ///
    /// Returns a [`ProductRuleError`] collecting every failed rule, one
    /// [`FieldError`] per field.
    pub fn validate(&mut self) -> Result<(), ProductRuleError> {
        let mut errors = Vec::new();

        let sku = self.sku.trim();
        if sku.is_empty() {
            errors.push(FieldError {
                field: "sku",
                message: "SKU is required".to_owned(),
            });
        } else if sku.len() > MAX_SKU_LENGTH {
            errors.push(FieldError {
                field: "sku",
                message: format!("SKU must be at most {MAX_SKU_LENGTH} characters"),
            });
        }

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError {
                field: "title",
                message: "title is required".to_owned(),
            });
        } else if title.len() > MAX_TITLE_LENGTH {
            errors.push(FieldError {
                field: "title",
                message: format!("title must be at most {MAX_TITLE_LENGTH} characters"),
            });
        }

        match price::validate_discount(self.price, self.discount_price) {
            Ok(()) => {}
            Err(PriceError::NonPositive) => errors.push(FieldError {
                field: "price",
                message: "price must be positive".to_owned(),
            }),
            Err(PriceError::NonPositiveDiscount | PriceError::DiscountNotBelowPrice) => {
                errors.push(FieldError {
                    field: "discount_price",
                    message: "discount price must be positive and less than the list price"
                        .to_owned(),
                });
            }
        }

        if self.stock_quantity < 0 {
            errors.push(FieldError {
                field: "stock_quantity",
                message: "stock quantity cannot be negative".to_owned(),
            });
        }

        if let Some(rating) = self.rating {
            if rating < Decimal::ONE || rating > Decimal::from(5) {
                errors.push(FieldError {
                    field: "rating",
                    message: "rating must be between 1 and 5".to_owned(),
                });
            }
        }

        match normalize_featured_image(&mut self.images) {
            Ok(()) => {}
            Err(message) => errors.push(FieldError {
                field: "images",
                message,
            }),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProductRuleError(errors))
        }
    }
}

/// Normalize a product's image list in place.
///
/// Sorts by position, reassigns contiguous positions, and ensures exactly one
/// image is featured: when none is marked the first becomes featured; more
/// than one marked is an error.
///
/// # Errors
///
/// Returns a message when the image count is outside 1-5 or more than one
/// image is marked featured.
pub fn normalize_featured_image(images: &mut [ProductImage]) -> Result<(), String> {
    if images.len() < MIN_IMAGES || images.len() > MAX_IMAGES {
        return Err(format!(
            "product must have between {MIN_IMAGES} and {MAX_IMAGES} images (got {})",
            images.len()
        ));
    }

    images.sort_by_key(|i| i.position);
    for (position, image) in images.iter_mut().enumerate() {
        image.position = i32::try_from(position).unwrap_or(i32::MAX);
    }

    let featured = images.iter().filter(|i| i.featured).count();
    match featured {
        1 => Ok(()),
        0 => {
            if let Some(first) = images.first_mut() {
                first.featured = true;
            }
            Ok(())
        }
        n => Err(format!("exactly one image may be featured (got {n})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(position: i32, featured: bool) -> ProductImage {
        ProductImage {
            url: format!("https://img.example.com/{position}.jpg"),
            asset_id: format!("asset-{position}"),
            position,
            featured,
        }
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            sku: "AUR-RING-001".to_owned(),
            title: "Solitaire Ring".to_owned(),
            description: "1ct solitaire on a 14k gold band".to_owned(),
            price: Decimal::from(1200),
            discount_price: None,
            category: ProductCategory::Rings,
            material: "14k gold".to_owned(),
            in_stock: true,
            stock_quantity: 3,
            is_new: true,
            is_featured: false,
            popularity: 10,
            rating: None,
            tags: vec!["solitaire".to_owned()],
            images: vec![image(0, false)],
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        let mut d = draft();
        d.validate().expect("valid draft");
        // the single unmarked image became featured
        assert!(d.images.first().expect("one image").featured);
    }

    #[test]
    fn test_discount_must_be_below_price() {
        let mut d = draft();
        d.discount_price = Some(Decimal::from(1200));
        let err = d.validate().expect_err("discount equals price");
        assert!(err.0.iter().any(|e| e.field == "discount_price"));
    }

    #[test]
    fn test_image_count_bounds() {
        let mut d = draft();
        d.images = Vec::new();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.images = (0..6).map(|p| image(p, false)).collect();
        let err = d.validate().expect_err("six images");
        assert!(err.0.iter().any(|e| e.field == "images"));
    }

    #[test]
    fn test_exactly_one_featured_image() {
        let mut d = draft();
        d.images = vec![image(0, true), image(1, true)];
        let err = d.validate().expect_err("two featured");
        assert!(err.0.iter().any(|e| e.field == "images"));
    }

    #[test]
    fn test_featured_defaults_to_first_after_position_sort() {
        let mut images = vec![image(2, false), image(0, false), image(1, false)];
        normalize_featured_image(&mut images).expect("normalizes");
        assert_eq!(
            images
                .iter()
                .map(|i| i.asset_id.as_str())
                .collect::<Vec<_>>(),
            vec!["asset-0", "asset-1", "asset-2"]
        );
        assert!(images.first().expect("non-empty").featured);
        assert_eq!(images.iter().filter(|i| i.featured).count(), 1);
    }

    #[test]
    fn test_rating_bounds() {
        let mut d = draft();
        d.rating = Some(Decimal::from(6));
        assert!(d.validate().is_err());
        d.rating = Some(Decimal::from(5));
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_multiple_field_errors_collected() {
        let mut d = draft();
        d.sku = String::new();
        d.title = String::new();
        d.price = Decimal::ZERO;
        let err = d.validate().expect_err("several failures");
        let fields: Vec<_> = err.0.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"sku"));
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"price"));
    }

    #[test]
    fn test_effective_price_and_percent() {
        let mut d = draft();
        d.discount_price = Some(Decimal::from(900));
        d.validate().expect("valid");
        let product = Product {
            id: ProductId::new(1),
            external_id: Uuid::new_v4(),
            sku: d.sku,
            title: d.title,
            description: d.description,
            price: d.price,
            discount_price: d.discount_price,
            category: d.category,
            material: d.material,
            in_stock: d.in_stock,
            stock_quantity: d.stock_quantity,
            is_new: d.is_new,
            is_featured: d.is_featured,
            popularity: d.popularity,
            rating: d.rating,
            tags: d.tags,
            images: d.images,
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.effective_price(), Decimal::from(900));
        assert_eq!(product.discount_percent(), Some(Decimal::from(25)));
        assert!(product.featured_image().is_some());
    }
}
