//! # Product View
//!
//! The headless logic behind one product card: it owns the shopper's
//! selection and answers every question the card's renderer asks.
//!
//! ## Card Interaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌───────────────────────┐                                              │
//! │  │   [image]  -20% OFF   │ ◄── display_image(), price().discount        │
//! │  │   LEVI'S              │ ◄── card().brand                             │
//! │  │   501 Original Fit    │                                              │
//! │  │   $80.00  ~~$100.00~~ │ ◄── price()                                  │
//! │  │   Size  [S] [M]       │ ◄── options(): available values only        │
//! │  │   Color (●) (●)       │ ◄── swatches on the Color option             │
//! │  │   [ Add to Cart ]     │ ◄── can_add_to_cart() / line_draft()         │
//! │  └───────────────────────┘                                              │
//! │                                                                         │
//! │  click value  ──► select(name, value) ──► matching_variant() updates    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::attributes;
use crate::availability;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::pricing::{self, PriceDisplay};
use crate::resolver;
use crate::selection::Selection;
use crate::types::{Product, Variant};

// =============================================================================
// Line Draft
// =============================================================================

/// Everything the cart store needs to add one unit.
///
/// Prices are captured here and locked into the cart line; the cart never
/// re-prices against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineDraft {
    pub product_id: String,
    /// `None` for products without variants.
    pub variant_id: Option<String>,
    pub title: String,
    pub unit_price: Money,
    pub compare_at: Option<Money>,
    /// Picked options, kept for display in the cart drawer.
    pub selection: Selection,
    /// Caller's stock verdict. The store rejects drafts that are not.
    pub purchasable: bool,
}

// =============================================================================
// Render DTOs
// =============================================================================

/// One option value button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OptionValueState {
    pub value: String,
    pub selected: bool,
    pub available: bool,
    pub swatch: Option<String>,
}

/// One option row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OptionState {
    pub name: String,
    pub values: Vec<OptionValueState>,
}

/// Snapshot of a product card, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductCard {
    pub product_id: String,
    pub title: String,
    pub slug: String,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub featured: bool,
    pub image: Option<String>,
    pub price: PriceDisplay,
    pub options: Vec<OptionState>,
    pub selection: Selection,
    pub matching_variant_id: Option<String>,
    pub missing_options: Vec<String>,
    pub in_stock: bool,
    pub can_add_to_cart: bool,
}

// =============================================================================
// Product View
// =============================================================================

/// Headless product card state for one product.
#[derive(Debug, Clone)]
pub struct ProductView<'a> {
    product: &'a Product,
    selection: Selection,
}

impl<'a> ProductView<'a> {
    /// Starts with nothing selected.
    pub fn new(product: &'a Product) -> Self {
        ProductView {
            product,
            selection: Selection::new(),
        }
    }

    /// Starts from an existing selection (e.g. restored from the URL).
    pub fn with_selection(product: &'a Product, selection: Selection) -> CoreResult<Self> {
        crate::validation::validate_selection(product, &selection)?;
        Ok(ProductView { product, selection })
    }

    pub fn product(&self) -> &'a Product {
        self.product
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Picks a value for an option.
    ///
    /// The option must exist and list the value. Whether the value is still
    /// available is the renderer's concern (it only offers available ones).
    pub fn select(&mut self, option_name: &str, value: &str) -> CoreResult<()> {
        let option = self
            .product
            .option(option_name)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "option".to_string(),
                allowed: self.product.option_names().map(str::to_string).collect(),
            })?;

        if !option.values.iter().any(|v| v == value) {
            return Err(ValidationError::NotAllowed {
                field: option_name.to_string(),
                allowed: option.values.clone(),
            }
            .into());
        }

        self.selection.set(option_name, value);
        Ok(())
    }

    pub fn clear_option(&mut self, option_name: &str) {
        self.selection.remove(option_name);
    }

    pub fn reset(&mut self) {
        self.selection.clear();
    }

    pub fn is_option_value_available(&self, option_name: &str, value: &str) -> bool {
        availability::is_value_available(option_name, value, &self.selection, &self.product.variants)
    }

    /// Selectable values of an option, in display order.
    pub fn available_values(&self, option_name: &str) -> Vec<&'a str> {
        self.product
            .option(option_name)
            .map(|option| availability::available_values(option, &self.selection, &self.product.variants))
            .unwrap_or_default()
    }

    /// Resolves the current selection.
    pub fn resolve(&self) -> CoreResult<&'a Variant> {
        resolver::resolve_variant(self.product, &self.selection)
    }

    /// The resolved variant, if the selection is complete and exists.
    pub fn matching_variant(&self) -> Option<&'a Variant> {
        self.resolve().ok()
    }

    pub fn price(&self) -> PriceDisplay {
        pricing::compute_price(self.product, self.matching_variant())
    }

    /// Variant image override, else the first product image.
    pub fn display_image(&self) -> Option<&'a str> {
        self.matching_variant()
            .and_then(|v| v.image.as_deref())
            .or_else(|| self.product.primary_image())
    }

    /// Stock badge state.
    ///
    /// - no variants: product-level stock
    /// - resolved variant: that variant's stock
    /// - unresolved: whether any variant is in stock
    pub fn in_stock(&self) -> bool {
        if !self.product.has_variants() {
            return self.product.stock.is_available();
        }
        match self.matching_variant() {
            Some(variant) => variant.is_available(),
            None => self.product.any_in_stock(),
        }
    }

    /// Whether "Add to Cart" is enabled.
    pub fn can_add_to_cart(&self) -> bool {
        if !self.product.has_variants() {
            return self.product.stock.is_available();
        }
        self.matching_variant().is_some_and(Variant::is_available)
    }

    /// Builds the cart draft for the current selection.
    ///
    /// Fails with `NoMatch` when a variant product has no resolved variant.
    /// An out-of-stock item still yields a draft, marked not purchasable.
    pub fn line_draft(&self) -> CoreResult<LineDraft> {
        let variant = if self.product.has_variants() {
            Some(self.resolve()?)
        } else {
            None
        };
        let price = pricing::compute_price(self.product, variant);

        Ok(LineDraft {
            product_id: self.product.id.clone(),
            variant_id: variant.map(|v| v.id.clone()),
            title: self.product.title.clone(),
            unit_price: price.current,
            compare_at: price.compare_at,
            selection: self.selection.clone(),
            purchasable: self.can_add_to_cart(),
        })
    }

    /// Like [`line_draft`](Self::line_draft) but refuses unpurchasable items.
    pub fn purchasable_draft(&self) -> CoreResult<LineDraft> {
        let draft = self.line_draft()?;
        if !draft.purchasable {
            return Err(CoreError::OutOfStock {
                product_id: draft.product_id,
            });
        }
        Ok(draft)
    }

    /// Render snapshot of the whole card.
    pub fn card(&self) -> ProductCard {
        let options = self
            .product
            .options
            .iter()
            .map(|option| OptionState {
                name: option.name.clone(),
                values: option
                    .values
                    .iter()
                    .map(|value| OptionValueState {
                        value: value.clone(),
                        selected: self.selection.get(&option.name) == Some(value.as_str()),
                        available: self.is_option_value_available(&option.name, value),
                        swatch: option.swatch(value).map(str::to_string),
                    })
                    .collect(),
            })
            .collect();

        ProductCard {
            product_id: self.product.id.clone(),
            title: self.product.title.clone(),
            slug: self.product.slug.clone(),
            brand: attributes::brand(self.product).map(str::to_string),
            condition: attributes::condition(self.product).map(str::to_string),
            featured: self.product.featured,
            image: self.display_image().map(str::to_string),
            price: self.price(),
            options,
            selection: self.selection.clone(),
            matching_variant_id: self.matching_variant().map(|v| v.id.clone()),
            missing_options: self
                .selection
                .missing(&self.product.options)
                .into_iter()
                .map(str::to_string)
                .collect(),
            in_stock: self.in_stock(),
            can_add_to_cart: self.can_add_to_cart(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
