//! Catalog filtering, sorting, and search.
//!
//! Pure, synchronous list transformations over an in-memory product slice.
//! The database hands back the full catalog; everything here is predicate
//! filters, comparators, and substring matching - no persistence and no
//! shared state.
//!
//! Filter predicates never look at list order, so filtering and sorting
//! commute (covered by a test below).

use rust_decimal::Decimal;
use serde::Deserialize;

use auric_core::{CatalogSort, Product, ProductCategory};

/// Catalog query parameters, deserialized straight from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    /// Restrict to one product category.
    pub category: Option<ProductCategory>,
    /// Minimum effective price, inclusive.
    pub min_price: Option<Decimal>,
    /// Maximum effective price, inclusive.
    pub max_price: Option<Decimal>,
    /// Only purchasable products.
    pub in_stock: Option<bool>,
    /// Only discounted products.
    pub on_sale: Option<bool>,
    /// Only new arrivals.
    pub new: Option<bool>,
    /// Case-insensitive substring search.
    pub q: Option<String>,
    /// Sort order (defaults to popularity).
    pub sort: Option<CatalogSort>,
}

/// Apply a catalog query: filter, search, then sort.
#[must_use]
pub fn apply(products: Vec<Product>, query: &CatalogQuery) -> Vec<Product> {
    let mut result: Vec<Product> = products
        .into_iter()
        .filter(|p| matches_filters(p, query))
        .collect();

    if let Some(term) = query.q.as_deref() {
        let term = term.trim();
        if !term.is_empty() {
            result.retain(|p| matches_search(p, term));
        }
    }

    sort(&mut result, query.sort.unwrap_or_default());
    result
}

/// Whether a product passes every filter predicate in the query.
///
/// Price brackets compare against the effective price (the discount price
/// when one is set), which is what the shopper actually pays.
#[must_use]
pub fn matches_filters(product: &Product, query: &CatalogQuery) -> bool {
    if let Some(category) = query.category {
        if product.category != category {
            return false;
        }
    }

    let price = product.effective_price();
    if let Some(min) = query.min_price {
        if price < min {
            return false;
        }
    }
    if let Some(max) = query.max_price {
        if price > max {
            return false;
        }
    }

    if let Some(in_stock) = query.in_stock {
        if product.in_stock != in_stock {
            return false;
        }
    }

    if let Some(on_sale) = query.on_sale {
        if product.discount_price.is_some() != on_sale {
            return false;
        }
    }

    if let Some(new) = query.new {
        if product.is_new != new {
            return false;
        }
    }

    true
}

/// Case-insensitive substring match across title, description, category, and
/// tags.
#[must_use]
pub fn matches_search(product: &Product, term: &str) -> bool {
    let term = term.to_lowercase();

    product.title.to_lowercase().contains(&term)
        || product.description.to_lowercase().contains(&term)
        || product.category.as_str().contains(&term)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&term))
}

/// Sort products in place by the requested order.
///
/// Ties break on the database primary key so the ordering is total and
/// stable across requests.
pub fn sort(products: &mut [Product], order: CatalogSort) {
    match order {
        CatalogSort::Popularity => {
            products.sort_by(|a, b| {
                b.popularity
                    .cmp(&a.popularity)
                    .then(a.id.as_i32().cmp(&b.id.as_i32()))
            });
        }
        CatalogSort::PriceAsc => {
            products.sort_by(|a, b| {
                a.effective_price()
                    .cmp(&b.effective_price())
                    .then(a.id.as_i32().cmp(&b.id.as_i32()))
            });
        }
        CatalogSort::PriceDesc => {
            products.sort_by(|a, b| {
                b.effective_price()
                    .cmp(&a.effective_price())
                    .then(a.id.as_i32().cmp(&b.id.as_i32()))
            });
        }
        CatalogSort::Newest => {
            products.sort_by(|a, b| {
                b.created_at
                    .cmp(&a.created_at)
                    .then(a.id.as_i32().cmp(&b.id.as_i32()))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use auric_core::{ProductId, ProductImage};

    fn product(id: i32, category: ProductCategory, price: i64, popularity: i32) -> Product {
        Product {
            id: ProductId::new(id),
            external_id: Uuid::new_v4(),
            sku: format!("SKU-{id}"),
            title: format!("Product {id}"),
            description: "A fine piece".to_owned(),
            price: Decimal::from(price),
            discount_price: None,
            category,
            material: "sterling silver".to_owned(),
            in_stock: true,
            stock_quantity: 5,
            is_new: false,
            is_featured: false,
            popularity,
            rating: None,
            tags: Vec::new(),
            images: vec![ProductImage {
                url: "https://img.example.com/1.jpg".to_owned(),
                asset_id: "asset-1".to_owned(),
                position: 0,
                featured: true,
            }],
            version: 1,
            created_at: Utc::now() - Duration::days(i64::from(id)),
            updated_at: Utc::now(),
        }
    }

    fn fixture() -> Vec<Product> {
        let mut ring = product(1, ProductCategory::Rings, 1200, 50);
        ring.tags = vec!["solitaire".to_owned(), "engagement".to_owned()];
        ring.is_new = true;

        let mut necklace = product(2, ProductCategory::Necklaces, 300, 80);
        necklace.discount_price = Some(Decimal::from(240));

        let mut earrings = product(3, ProductCategory::Earrings, 150, 20);
        earrings.in_stock = false;

        let bracelet = product(4, ProductCategory::Bracelets, 450, 80);

        vec![ring, necklace, earrings, bracelet]
    }

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        let query = CatalogQuery {
            category: Some(ProductCategory::Rings),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&apply(fixture(), &query)), vec![1]);
    }

    #[test]
    fn test_price_bracket_uses_effective_price() {
        // The necklace lists at 300 but is discounted to 240, so a 250 cap
        // keeps it.
        let query = CatalogQuery {
            min_price: Some(Decimal::from(200)),
            max_price: Some(Decimal::from(250)),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&apply(fixture(), &query)), vec![2]);
    }

    #[test]
    fn test_filter_in_stock_and_on_sale() {
        let query = CatalogQuery {
            in_stock: Some(false),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&apply(fixture(), &query)), vec![3]);

        let query = CatalogQuery {
            on_sale: Some(true),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&apply(fixture(), &query)), vec![2]);
    }

    #[test]
    fn test_filter_new_arrivals() {
        let query = CatalogQuery {
            new: Some(true),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&apply(fixture(), &query)), vec![1]);
    }

    #[test]
    fn test_search_across_fields() {
        let products = fixture();
        let hit = products.first().expect("fixture non-empty");

        assert!(matches_search(hit, "SOLITAIRE")); // tag, case-insensitive
        assert!(matches_search(hit, "product 1")); // title
        assert!(matches_search(hit, "fine piece")); // description
        assert!(matches_search(hit, "ring")); // category text
        assert!(!matches_search(hit, "wristwatch"));
    }

    #[test]
    fn test_sort_popularity_breaks_ties_by_id() {
        let mut products = fixture();
        sort(&mut products, CatalogSort::Popularity);
        assert_eq!(ids(&products), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_price_directions() {
        let mut products = fixture();
        sort(&mut products, CatalogSort::PriceAsc);
        assert_eq!(ids(&products), vec![3, 2, 4, 1]);

        sort(&mut products, CatalogSort::PriceDesc);
        assert_eq!(ids(&products), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_sort_newest() {
        let mut products = fixture();
        sort(&mut products, CatalogSort::Newest);
        // created_at goes back `id` days, so lower ids are newer
        assert_eq!(ids(&products), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_filter_then_sort_equals_sort_then_filter() {
        let queries = [
            CatalogQuery {
                category: Some(ProductCategory::Necklaces),
                sort: Some(CatalogSort::PriceAsc),
                ..CatalogQuery::default()
            },
            CatalogQuery {
                in_stock: Some(true),
                sort: Some(CatalogSort::Newest),
                ..CatalogQuery::default()
            },
            CatalogQuery {
                min_price: Some(Decimal::from(100)),
                max_price: Some(Decimal::from(1000)),
                sort: Some(CatalogSort::PriceDesc),
                ..CatalogQuery::default()
            },
        ];

        for query in queries {
            let order = query.sort.unwrap_or_default();

            // filter, then sort
            let mut filtered_first: Vec<Product> = fixture()
                .into_iter()
                .filter(|p| matches_filters(p, &query))
                .collect();
            sort(&mut filtered_first, order);

            // sort, then filter
            let mut sorted_first = fixture();
            sort(&mut sorted_first, order);
            let sorted_first: Vec<Product> = sorted_first
                .into_iter()
                .filter(|p| matches_filters(p, &query))
                .collect();

            assert_eq!(ids(&filtered_first), ids(&sorted_first));
        }
    }

    #[test]
    fn test_apply_combines_filter_search_sort() {
        let query = CatalogQuery {
            in_stock: Some(true),
            q: Some("product".to_owned()),
            sort: Some(CatalogSort::PriceAsc),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&apply(fixture(), &query)), vec![2, 4, 1]);
    }
}
