//! # Domain Types
//!
//! Catalog records consumed by the storefront logic.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌──────────────────┐      ┌──────────────────┐   ┌──────────────────┐ │
//! │  │     Product      │ 1..n │  ProductOption   │   │    Collection    │ │
//! │  │  ──────────────  │─────►│  ──────────────  │   │  ──────────────  │ │
//! │  │  id, slug        │      │  name ("Size")   │   │  id, name        │ │
//! │  │  price           │      │  values [S, M]   │   │  product_ids     │ │
//! │  │  compare_at      │      │  swatches        │   │  featured        │ │
//! │  │  tags, featured  │      └──────────────────┘   └──────────────────┘ │
//! │  │  attributes      │ 0..n ┌──────────────────┐                        │
//! │  │                  │─────►│     Variant      │                        │
//! │  └──────────────────┘      │  ──────────────  │                        │
//! │                            │  options map     │                        │
//! │                            │  price?, stock   │                        │
//! │                            │  image?          │                        │
//! │                            └──────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records arrive from the catalog provider already validated; the JSON is
//! camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Inventory
// =============================================================================

/// Stock for a variant (or for a product without variants).
///
/// The catalog sends either a count (`"stock": 3`) or a plain flag
/// (`"stock": true`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Inventory {
    /// Tracked stock count.
    Count(i64),
    /// Availability flag only.
    Flag(bool),
}

impl Inventory {
    /// True when at least one unit can be sold.
    #[inline]
    pub fn is_available(&self) -> bool {
        match *self {
            Inventory::Count(n) => n > 0,
            Inventory::Flag(available) => available,
        }
    }

    /// Units on hand, when tracked.
    pub fn count(&self) -> Option<i64> {
        match *self {
            Inventory::Count(n) => Some(n),
            Inventory::Flag(_) => None,
        }
    }
}

/// Records without stock information are sellable.
impl Default for Inventory {
    fn default() -> Self {
        Inventory::Flag(true)
    }
}

// =============================================================================
// Product Option
// =============================================================================

/// A named option dimension such as "Size" or "Color".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductOption {
    /// Option name, compared case-sensitively against variant keys.
    pub name: String,

    /// Values in display order.
    pub values: Vec<String>,

    /// Value → CSS color, only honored on the "Color" option.
    #[serde(default)]
    pub swatches: BTreeMap<String, String>,
}

impl ProductOption {
    /// Creates an option without swatches.
    pub fn new(name: impl Into<String>, values: &[&str]) -> Self {
        ProductOption {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
            swatches: BTreeMap::new(),
        }
    }

    /// Whether this is the color dimension (case-insensitive name check).
    pub fn is_color(&self) -> bool {
        self.name.eq_ignore_ascii_case("color")
    }

    /// Swatch color for a value, if this is the color option and one is set.
    pub fn swatch(&self, value: &str) -> Option<&str> {
        if !self.is_color() {
            return None;
        }
        self.swatches.get(value).map(String::as_str)
    }
}

// =============================================================================
// Variant
// =============================================================================

/// One concrete purchasable combination of option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Variant {
    pub id: String,

    /// Option name → chosen value. Covers every option of the parent once.
    pub options: BTreeMap<String, String>,

    /// Own price; falls back to the product price when absent.
    #[serde(default)]
    pub price: Option<Money>,

    /// Own compare-at price; falls back to the product's when absent.
    #[serde(default)]
    pub compare_at: Option<Money>,

    #[serde(default)]
    pub stock: Inventory,

    /// Image override shown while this variant is selected.
    #[serde(default)]
    pub image: Option<String>,
}

impl Variant {
    /// Value this variant carries for an option.
    #[inline]
    pub fn value_of(&self, option_name: &str) -> Option<&str> {
        self.options.get(option_name).map(String::as_str)
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock.is_available()
    }
}

// =============================================================================
// Product Attributes
// =============================================================================

/// Structured attributes that older catalog records encode as tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductAttributes {
    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub condition: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// A product listed in the storefront.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub id: String,

    /// Display title.
    pub title: String,

    /// URL slug (`/products/{slug}`).
    pub slug: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Base price used when no variant is resolved or the variant has none.
    pub price: Money,

    /// Base "was" price.
    #[serde(default)]
    pub compare_at: Option<Money>,

    /// Option dimensions in display order.
    #[serde(default)]
    pub options: Vec<ProductOption>,

    #[serde(default)]
    pub variants: Vec<Variant>,

    /// Free-form tags. Legacy records carry brand/condition here.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub attributes: ProductAttributes,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub images: Vec<String>,

    /// Product-level stock. Only consulted when the product has no variants.
    #[serde(default)]
    pub stock: Inventory,
}

impl Product {
    /// Whether the shopper must pick options before buying.
    #[inline]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Looks up an option dimension by name.
    pub fn option(&self, name: &str) -> Option<&ProductOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Looks up a variant by identifier.
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Option names in display order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.name.as_str())
    }

    /// First listing image.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether any unit of this product can be bought.
    ///
    /// Variant products are in stock when any variant is; the product-level
    /// stock is ignored for them.
    pub fn any_in_stock(&self) -> bool {
        if self.has_variants() {
            self.variants.iter().any(Variant::is_available)
        } else {
            self.stock.is_available()
        }
    }
}

// =============================================================================
// Collection
// =============================================================================

/// A curated group of products (era, style, brand).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    /// Member product identifiers.
    #[serde(default)]
    pub product_ids: Vec<String>,
}

impl Collection {
    #[inline]
    pub fn contains(&self, product_id: &str) -> bool {
        self.product_ids.iter().any(|id| id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
