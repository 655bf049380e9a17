//! # Cart Model
//!
//! The cart as plain data: ordered lines keyed by `(product, variant)`.
//! No locking and no persistence here; [`CartStore`](crate::CartStore)
//! wraps this with both.
//!
//! ## Line Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   absent ──add_line──► present(1) ──add_line──► present(n+1)           │
//! │     ▲                      │                        │                   │
//! │     │                      └──update_quantity(k>0)──┤ (clamped to max)  │
//! │     │                                               │                   │
//! │     └────── update_quantity(0) / remove_line ◄──────┘                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use finds_core::validation;
use finds_core::{LineDraft, Money, Selection};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::config::CartConfig;
use crate::error::{CartError, CartResult};

// =============================================================================
// Line Key
// =============================================================================

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineKey {
    pub product_id: String,
    pub variant_id: Option<String>,
}

impl LineKey {
    pub fn new(product_id: impl Into<String>, variant_id: Option<impl Into<String>>) -> Self {
        LineKey {
            product_id: product_id.into(),
            variant_id: variant_id.map(Into::into),
        }
    }

    /// Key for a product without variants.
    pub fn product(product_id: impl Into<String>) -> Self {
        LineKey {
            product_id: product_id.into(),
            variant_id: None,
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.variant_id {
            Some(variant_id) => write!(f, "{}/{}", self.product_id, variant_id),
            None => write!(f, "{}", self.product_id),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One line in the cart.
///
/// ## Price Freezing
/// `unit_price` and `compare_at` are captured when the line is first added.
/// Adding the same key again bumps the quantity and keeps the first price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub compare_at: Option<Money>,
    #[serde(default)]
    pub selection: Selection,

    /// Product title at time of adding (frozen)
    #[serde(default)]
    pub title: String,

    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// New line with quantity 1.
    pub fn from_draft(draft: LineDraft) -> Self {
        CartLine {
            product_id: draft.product_id,
            variant_id: draft.variant_id,
            quantity: 1,
            unit_price: draft.unit_price,
            compare_at: draft.compare_at,
            selection: draft.selection,
            title: draft.title,
            added_at: Utc::now(),
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            variant_id: self.variant_id.clone(),
        }
    }

    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.variant_id == key.variant_id
    }

    /// unit price × quantity
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// (compare-at − unit price) × quantity, zero when not on sale.
    pub fn line_savings(&self) -> Money {
        match self.compare_at {
            Some(compare_at) if compare_at > self.unit_price => {
                (compare_at - self.unit_price).multiply_quantity(self.quantity)
            }
            _ => Money::zero(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by [`LineKey`]
/// - Every quantity is in `1..=max_quantity`
/// - At most `max_lines` lines
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    max_quantity: i64,
    max_lines: usize,
}

impl Cart {
    /// Creates an empty cart with the configured limits. Limits below 1
    /// are raised to 1.
    pub fn new(config: &CartConfig) -> Self {
        Cart {
            lines: Vec::new(),
            max_quantity: config.max_quantity.max(1),
            max_lines: config.max_lines.max(1),
        }
    }

    /// Rebuilds a cart from restored lines under the current limits.
    ///
    /// Quantities are clamped to `max_quantity`. Lines past `max_lines` are
    /// dropped, keeping the oldest.
    pub fn from_lines(mut lines: Vec<CartLine>, config: &CartConfig) -> Self {
        let mut cart = Cart::new(config);
        if lines.len() > cart.max_lines {
            warn!(
                restored = lines.len(),
                max = cart.max_lines,
                "Restored cart exceeds line limit, dropping newest lines"
            );
            lines.truncate(cart.max_lines);
        }

        cart.lines = lines
            .into_iter()
            .map(|mut line| {
                line.quantity = validation::clamp_quantity(line.quantity, cart.max_quantity);
                line
            })
            .collect();
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Adds one unit of the drafted item.
    ///
    /// ## Behavior
    /// - Not purchasable: `OutOfStock`, cart unchanged
    /// - Price outside `0..=MAX_PRICE_CENTS`: validation error, cart unchanged
    /// - Key already present: quantity + 1 (stays at max), price unchanged
    /// - Otherwise: appends a new line with quantity 1
    ///
    /// ## Returns
    /// The line's quantity after the add.
    pub fn add_line(&mut self, draft: LineDraft) -> CartResult<i64> {
        if !draft.purchasable {
            return Err(CartError::OutOfStock {
                product_id: draft.product_id,
            });
        }
        for price in std::iter::once(draft.unit_price).chain(draft.compare_at) {
            validation::validate_price_cents(price.cents()).map_err(finds_core::CoreError::from)?;
        }

        let max_quantity = self.max_quantity;
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == draft.product_id && line.variant_id == draft.variant_id)
        {
            if line.quantity >= max_quantity {
                debug!(key = %line.key(), max = max_quantity, "Line already at max quantity");
            } else {
                line.quantity += 1;
            }
            return Ok(line.quantity);
        }

        if self.lines.len() >= self.max_lines {
            return Err(CartError::TooManyLines {
                max: self.max_lines,
            });
        }

        self.lines.push(CartLine::from_draft(draft));
        Ok(1)
    }

    /// Sets a line's quantity.
    ///
    /// ## Behavior
    /// - Negative: `InvalidQuantity`
    /// - 0: removes the line (no error if absent)
    /// - Above max: clamped to max
    /// - Absent key with positive quantity: `LineNotFound`
    ///
    /// ## Returns
    /// The stored quantity, or `None` when the line was removed.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> CartResult<Option<i64>> {
        validation::validate_quantity_update(quantity)?;

        if quantity == 0 {
            self.remove_line(key);
            return Ok(None);
        }

        let clamped = validation::clamp_quantity(quantity, self.max_quantity);
        if clamped != quantity {
            debug!(key = %key, requested = quantity, clamped, "Quantity clamped");
        }

        let line = self
            .lines
            .iter_mut()
            .find(|line| line.matches(key))
            .ok_or_else(|| CartError::LineNotFound(key.clone()))?;
        line.quantity = clamped;
        Ok(Some(clamped))
    }

    /// Removes a line. Returns whether anything was removed.
    pub fn remove_line(&mut self, key: &LineKey) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| !line.matches(key));
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of `unit_price × quantity`.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of compare-at savings across lines.
    pub fn total_savings(&self) -> Money {
        self.lines.iter().map(CartLine::line_savings).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new(&CartConfig::default())
    }
}

/// Cart totals summary for responses and the drawer footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_items: i64,
    pub total_price: Money,
    pub total_savings: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            total_savings: cart.total_savings(),
        }
    }
}
