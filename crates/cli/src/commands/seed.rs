//! Seed the database with sample catalog data.
//!
//! Intended for local development and demo environments. Seeding goes
//! through the same repositories the API uses, so seeded products get
//! audit entries like any other mutation. Refuses to run against a
//! non-empty catalog.

use rust_decimal::Decimal;

use auric_core::{
    Email, ProductCategory, ProductDraft, ProductImage, SiteSettings, Slug,
};

use auric_admin::db::categories::{AdminCategoryRepository, CategoryInput};
use auric_admin::db::products::AdminProductRepository;
use auric_admin::db::settings::upsert_site_settings;

use super::{CliError, connect};

/// Actor recorded on seeded products' audit entries.
const SEED_ACTOR: &str = "seed@auric.local";

/// Seed categories, products, and default site settings.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    let products = AdminProductRepository::new(&pool);
    if !products.list_all().await?.is_empty() {
        return Err(CliError::InvalidInput(
            "catalog is not empty; refusing to seed".to_owned(),
        ));
    }

    let actor = Email::parse(SEED_ACTOR)
        .map_err(|e| CliError::InvalidInput(format!("bad seed actor: {e}")))?;

    let categories = AdminCategoryRepository::new(&pool);
    for (name, slug, order) in [
        ("Engagement Rings", "engagement-rings", 0),
        ("Necklaces", "necklaces", 1),
        ("Earrings", "earrings", 2),
    ] {
        let slug = Slug::parse(slug)
            .map_err(|e| CliError::InvalidInput(format!("bad seed slug: {e}")))?;
        categories
            .create(&CategoryInput {
                name: name.to_owned(),
                slug,
                image_url: None,
                description: None,
                display_order: order,
                active: true,
            })
            .await?;
    }

    for mut draft in sample_products() {
        draft
            .validate()
            .map_err(|e| CliError::InvalidInput(format!("bad seed product: {e}")))?;
        let product = products.create(&draft, &actor).await?;
        tracing::info!(sku = %product.sku, "seeded product");
    }

    let settings = SiteSettings {
        store_name: "Auric Jewelry".to_owned(),
        contact_email: Some("hello@auricjewelry.co".to_owned()),
        ..SiteSettings::default()
    };
    upsert_site_settings(&pool, &settings).await?;

    tracing::info!("Seeding complete");
    Ok(())
}

fn image(url: &str, asset_id: &str) -> ProductImage {
    ProductImage {
        url: url.to_owned(),
        asset_id: asset_id.to_owned(),
        position: 0,
        featured: false,
    }
}

fn sample_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft {
            sku: "AUR-RING-001".to_owned(),
            title: "Solitaire Diamond Ring".to_owned(),
            description: "1ct round brilliant solitaire on a 14k gold band.".to_owned(),
            price: Decimal::new(129_500, 2),
            discount_price: None,
            category: ProductCategory::Rings,
            material: "14k gold".to_owned(),
            in_stock: true,
            stock_quantity: 4,
            is_new: true,
            is_featured: true,
            popularity: 90,
            rating: None,
            tags: vec!["solitaire".to_owned(), "diamond".to_owned()],
            images: vec![image("https://img.auricjewelry.co/ring-001.jpg", "seed-ring-001")],
        },
        ProductDraft {
            sku: "AUR-NECK-001".to_owned(),
            title: "Pearl Strand Necklace".to_owned(),
            description: "Freshwater pearl strand with a sterling silver clasp.".to_owned(),
            price: Decimal::new(38_000, 2),
            discount_price: Some(Decimal::new(29_900, 2)),
            category: ProductCategory::Necklaces,
            material: "sterling silver".to_owned(),
            in_stock: true,
            stock_quantity: 10,
            is_new: false,
            is_featured: false,
            popularity: 60,
            rating: None,
            tags: vec!["pearl".to_owned()],
            images: vec![image("https://img.auricjewelry.co/neck-001.jpg", "seed-neck-001")],
        },
        ProductDraft {
            sku: "AUR-EARR-001".to_owned(),
            title: "Gold Hoop Earrings".to_owned(),
            description: "Classic 18k gold hoops, 30mm.".to_owned(),
            price: Decimal::new(21_500, 2),
            discount_price: None,
            category: ProductCategory::Earrings,
            material: "18k gold".to_owned(),
            in_stock: true,
            stock_quantity: 15,
            is_new: false,
            is_featured: false,
            popularity: 75,
            rating: None,
            tags: vec!["hoops".to_owned()],
            images: vec![image("https://img.auricjewelry.co/earr-001.jpg", "seed-earr-001")],
        },
    ]
}
