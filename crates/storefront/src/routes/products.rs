//! Public product catalog routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use auric_core::Product;

use crate::catalog::{self, CatalogQuery};
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// A product as served to shoppers, with derived pricing attached.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    #[serde(flatten)]
    product: Product,
    /// The price the shopper pays.
    effective_price: Decimal,
    /// Derived discount percentage, when on sale.
    #[serde(skip_serializing_if = "Option::is_none")]
    discount_percent: Option<Decimal>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let effective_price = product.effective_price();
        let discount_percent = product.discount_percent();
        Self {
            product,
            effective_price,
            discount_percent,
        }
    }
}

/// Response for the product listing.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub total: usize,
}

/// List catalog products.
///
/// GET /api/products
///
/// Supports filtering (`category`, `min_price`, `max_price`, `in_stock`,
/// `on_sale`, `new`), substring search (`q`), and sorting (`sort`, default
/// popularity). Filters apply before search; sorting is stable with ties
/// broken by ID.
#[instrument(skip(state, query))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ProductListResponse>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    let products: Vec<ProductResponse> = catalog::apply(products, &query)
        .into_iter()
        .map(Into::into)
        .collect();

    let total = products.len();
    Ok(Json(ProductListResponse { products, total }))
}

/// Get a single product by its external ID.
///
/// GET /api/products/{external_id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(external_id): Path<Uuid>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_external_id(external_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {external_id}")))?;

    Ok(Json(product.into()))
}
