//! # Catalog
//!
//! The read-only port to the remote catalog, plus the listing filters the
//! home page applies on top of it.
//!
//! ## Listing Flow
//! ```text
//! CatalogProvider::products()
//!      │
//!      ▼
//! ProductFilter { collection?, brand?, condition?, featured_only }
//!      │   every set criterion must match
//!      ▼
//! "12 unique pieces available"
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::attributes;
use crate::error::CoreResult;
use crate::types::{Collection, Product};
use crate::validation;

// =============================================================================
// Catalog Provider Port
// =============================================================================

/// Source of catalog records.
///
/// Implementations fetch however they like; the storefront logic only reads.
pub trait CatalogProvider {
    fn products(&self) -> &[Product];

    fn collections(&self) -> &[Collection];

    fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products().iter().find(|p| p.slug == slug)
    }

    fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.products().iter().find(|p| p.id == id)
    }

    fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections().iter().find(|c| c.id == id)
    }
}

/// An in-memory catalog snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub collections: Vec<Collection>,
}

impl Catalog {
    pub fn new(products: Vec<Product>, collections: Vec<Collection>) -> Self {
        Catalog {
            products,
            collections,
        }
    }

    /// Checks every product's structural invariants.
    pub fn validate(&self) -> CoreResult<()> {
        for product in &self.products {
            validation::validate_product(product)?;
        }
        Ok(())
    }
}

impl CatalogProvider for Catalog {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn collections(&self) -> &[Collection] {
        &self.collections
    }
}

// =============================================================================
// Listing Filter
// =============================================================================

/// Criteria for the product grid. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductFilter {
    #[serde(default)]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub featured_only: bool,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        *self == ProductFilter::default()
    }

    /// Applies the filter to a catalog, keeping catalog order.
    ///
    /// An unknown collection id matches nothing.
    pub fn apply<'a, C: CatalogProvider + ?Sized>(&self, catalog: &'a C) -> Vec<&'a Product> {
        let collection = match &self.collection_id {
            Some(id) => match catalog.collection(id) {
                Some(collection) => Some(collection),
                None => return Vec::new(),
            },
            None => None,
        };

        catalog
            .products()
            .iter()
            .filter(|product| collection.map_or(true, |c| c.contains(&product.id)))
            .filter(|product| self.matches_attributes(product))
            .collect()
    }

    fn matches_attributes(&self, product: &Product) -> bool {
        if self.featured_only && !product.featured {
            return false;
        }
        if let Some(brand) = &self.brand {
            if attributes::brand(product) != Some(brand.as_str()) {
                return false;
            }
        }
        if let Some(condition) = &self.condition {
            if attributes::condition(product) != Some(condition.as_str()) {
                return false;
            }
        }
        true
    }
}
