//! # Product Commands
//!
//! Listing and product card commands.
//!
//! ## Browse Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Home page                                                              │
//! │     │  filter chips: [Denim] [Levi's] [Good Condition] [Featured]       │
//! │     ▼                                                                   │
//! │  invoke('list_products', { filter })                                    │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  ProductFilter::apply ──► "3 unique pieces available" + grid            │
//! │     │                                                                   │
//! │     ▼  shopper clicks option buttons                                    │
//! │  invoke('get_product', { slug, selection })                             │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  ProductView::card() ──► options, price, image, Add to Cart state       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use finds_core::attributes;
use finds_core::catalog::{CatalogProvider, ProductFilter};
use finds_core::pricing::{self, PriceDisplay};
use finds_core::validation::parse_option_pair;
use finds_core::view::ProductCard;
use finds_core::{Collection, Product, ProductView};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;

/// Grid tile for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryDto {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub featured: bool,
    pub image: Option<String>,
    pub price: PriceDisplay,
    pub in_stock: bool,
}

impl From<&Product> for ProductSummaryDto {
    fn from(product: &Product) -> Self {
        let view = ProductView::new(product);
        ProductSummaryDto {
            id: product.id.clone(),
            title: product.title.clone(),
            slug: product.slug.clone(),
            brand: attributes::brand(product).map(str::to_string),
            condition: attributes::condition(product).map(str::to_string),
            featured: product.featured,
            image: product.primary_image().map(str::to_string),
            price: pricing::compute_price(product, None),
            in_stock: view.in_stock(),
        }
    }
}

/// Product grid response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub count: usize,
    pub products: Vec<ProductSummaryDto>,
}

/// Lists products matching the filter, in catalog order.
pub fn list_products<C>(catalog: &C, filter: &ProductFilter) -> ProductListResponse
where
    C: CatalogProvider + ?Sized,
{
    debug!(?filter, "list_products command");
    let products: Vec<ProductSummaryDto> = filter
        .apply(catalog)
        .into_iter()
        .map(ProductSummaryDto::from)
        .collect();

    ProductListResponse {
        count: products.len(),
        products,
    }
}

/// Lists collections (featured first, then catalog order).
pub fn list_collections<C>(catalog: &C) -> Vec<Collection>
where
    C: CatalogProvider + ?Sized,
{
    let mut collections = catalog.collections().to_vec();
    collections.sort_by_key(|c| !c.featured);
    collections
}

/// Builds a product view for `slug` with `Name=Value` picks applied in order.
pub fn open_product<'a, C>(
    catalog: &'a C,
    slug: &str,
    selection: &[String],
) -> Result<ProductView<'a>, ApiError>
where
    C: CatalogProvider + ?Sized,
{
    let product = catalog
        .product_by_slug(slug)
        .ok_or_else(|| ApiError::not_found("Product", slug))?;

    let mut view = ProductView::new(product);
    for pick in selection {
        let (name, value) = parse_option_pair(pick)?;
        view.select(&name, &value)?;
    }
    Ok(view)
}

/// Product card state for `slug` and the given picks.
pub fn get_product<C>(catalog: &C, slug: &str, selection: &[String]) -> Result<ProductCard, ApiError>
where
    C: CatalogProvider + ?Sized,
{
    debug!(slug, picks = selection.len(), "get_product command");
    Ok(open_product(catalog, slug, selection)?.card())
}
