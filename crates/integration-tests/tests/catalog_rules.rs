//! Catalog transform rules: validated drafts flowing through the public
//! filter/sort/search pipeline.

use rust_decimal::Decimal;

use auric_core::{CatalogSort, ProductCategory};
use auric_integration_tests::{image, materialize, ring_draft};
use auric_storefront::catalog::{self, CatalogQuery};

fn catalog() -> Vec<auric_core::Product> {
    let ring = ring_draft();

    let mut discounted = ring_draft();
    discounted.sku = "AUR-NECK-100".to_owned();
    discounted.title = "Pearl Necklace".to_owned();
    discounted.category = ProductCategory::Necklaces;
    discounted.price = Decimal::from(600);
    discounted.discount_price = Some(Decimal::from(300));
    discounted.popularity = 80;

    let mut out_of_stock = ring_draft();
    out_of_stock.sku = "AUR-EARR-100".to_owned();
    out_of_stock.title = "Stud Earrings".to_owned();
    out_of_stock.category = ProductCategory::Earrings;
    out_of_stock.in_stock = false;
    out_of_stock.is_new = true;
    out_of_stock.popularity = 95;

    vec![
        materialize(1, ring),
        materialize(2, discounted),
        materialize(3, out_of_stock),
    ]
}

#[test]
fn price_bracket_uses_the_discounted_price() {
    let query = CatalogQuery {
        max_price: Some(Decimal::from(350)),
        ..CatalogQuery::default()
    };
    let result = catalog::apply(catalog(), &query);

    // the 600-list-price necklace qualifies because its sale price is 300
    assert_eq!(result.len(), 1);
    assert_eq!(result.first().map(|p| p.sku.as_str()), Some("AUR-NECK-100"));
}

#[test]
fn filters_compose() {
    let query = CatalogQuery {
        in_stock: Some(true),
        on_sale: Some(true),
        ..CatalogQuery::default()
    };
    let result = catalog::apply(catalog(), &query);
    assert_eq!(result.len(), 1);
    assert_eq!(result.first().map(|p| p.sku.as_str()), Some("AUR-NECK-100"));
}

#[test]
fn search_is_case_insensitive_across_fields() {
    let query = CatalogQuery {
        q: Some("PEARL".to_owned()),
        ..CatalogQuery::default()
    };
    let result = catalog::apply(catalog(), &query);
    assert_eq!(result.len(), 1);

    // category text matches too
    let query = CatalogQuery {
        q: Some("earrings".to_owned()),
        ..CatalogQuery::default()
    };
    assert_eq!(catalog::apply(catalog(), &query).len(), 1);
}

#[test]
fn default_sort_is_popularity_descending() {
    let result = catalog::apply(catalog(), &CatalogQuery::default());
    let skus: Vec<_> = result.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["AUR-EARR-100", "AUR-NECK-100", "AUR-RING-100"]);
}

#[test]
fn price_sort_uses_effective_price() {
    let query = CatalogQuery {
        sort: Some(CatalogSort::PriceAsc),
        ..CatalogQuery::default()
    };
    let result = catalog::apply(catalog(), &query);
    let first = result.first().expect("non-empty");
    assert_eq!(first.sku, "AUR-NECK-100");
    assert_eq!(first.effective_price(), Decimal::from(300));
}

#[test]
fn filter_and_sort_commute() {
    let query = CatalogQuery {
        in_stock: Some(true),
        sort: Some(CatalogSort::PriceDesc),
        ..CatalogQuery::default()
    };

    // filter then sort
    let filtered: Vec<_> = catalog()
        .into_iter()
        .filter(|p| catalog::matches_filters(p, &query))
        .collect();
    let mut filter_first = filtered;
    catalog::sort(&mut filter_first, CatalogSort::PriceDesc);

    // sort then filter
    let mut sorted = catalog();
    catalog::sort(&mut sorted, CatalogSort::PriceDesc);
    let sort_first: Vec<_> = sorted
        .into_iter()
        .filter(|p| catalog::matches_filters(p, &query))
        .collect();

    let a: Vec<_> = filter_first.iter().map(|p| p.id).collect();
    let b: Vec<_> = sort_first.iter().map(|p| p.id).collect();
    assert_eq!(a, b);
}

#[test]
fn normalized_images_survive_into_the_catalog() {
    let mut draft = ring_draft();
    draft.images = vec![image(2, false), image(0, false)];
    let product = materialize(9, draft);

    // positions compacted, first image featured
    let featured = product.featured_image().expect("has images");
    assert_eq!(featured.position, 0);
    assert!(featured.featured);
    assert_eq!(product.images.len(), 2);
}
