//! # Cart Commands
//!
//! Commands behind the cart drawer and the "Add to Cart" button.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐  open_cart   ┌──────────┐   │
//! │  │  Empty   │──────────────►│ In Cart  │────────────►│  Drawer  │   │
//! │  │  Cart    │               │ (badge)  │◄────────────│  Open    │   │
//! │  └──────────┘               └──────────┘  close_cart  └──────────┘   │
//! │       ▲                          │                         │         │
//! │       │                     update_cart_item          remove_from_   │
//! │       │                     (0 removes)               cart           │
//! │       └──────── clear_cart ──────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use finds_cart::bridge::badge_label;
use finds_cart::{Cart, CartLine, CartTotals, LineKey};
use finds_core::catalog::CatalogProvider;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::product::open_product;
use crate::error::ApiError;
use crate::state::{CartState, StorefrontConfig};

/// Cart response including lines, totals and the badge text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub badge: String,

    /// Totals rendered in the store currency, when a config is at hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<CartDisplay>,
}

/// Drawer footer strings, e.g. `"$160.00"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDisplay {
    pub total_price: String,
    pub total_savings: String,
}

impl CartResponse {
    /// Adds currency-formatted totals.
    pub fn formatted(mut self, config: &StorefrontConfig) -> Self {
        self.display = Some(CartDisplay {
            total_price: config.format_currency(self.totals.total_price.cents()),
            total_savings: config.format_currency(self.totals.total_savings.cents()),
        });
        self
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
            badge: badge_label(cart.total_items()),
            display: None,
        }
    }
}

/// Drawer state for chrome elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUiResponse {
    pub open: bool,
    pub total_items: i64,
    pub badge: String,
}

fn cart_response(cart: &CartState) -> CartResponse {
    cart.store().with_cart(|c| CartResponse::from(c))
}

fn ui_response(cart: &CartState) -> CartUiResponse {
    let bridge = cart.bridge();
    CartUiResponse {
        open: bridge.is_open(),
        total_items: bridge.total_items(),
        badge: bridge.badge_label(),
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart_response(cart)
}

/// Adds one unit of the product card's current selection.
///
/// ## User Workflow
/// ```text
/// Size [M]  Color [Red]  ──► [ Add to Cart ]
///                                  │
///                                  ▼
///   invoke('add_to_cart', { slug, selection: ["Size=M", "Color=Red"] })
///                                  │
///       ┌──────────────────────────┼──────────────────────────┐
///       ▼                          ▼                          ▼
///   incomplete pick           variant sold out            purchasable
///   NO_MATCH                  OUT_OF_STOCK                line qty + 1,
///                                                         price frozen
/// ```
///
/// Price comes from the catalog at this moment and is never re-checked.
pub fn add_to_cart<C>(
    catalog: &C,
    cart: &CartState,
    slug: &str,
    selection: &[String],
) -> Result<CartResponse, ApiError>
where
    C: CatalogProvider + ?Sized,
{
    debug!(slug, picks = selection.len(), "add_to_cart command");

    let view = open_product(catalog, slug, selection)?;
    let draft = view.line_draft()?;
    cart.store().add_line(draft)?;

    Ok(cart_response(cart))
}

/// Sets a line's quantity from raw input.
///
/// ## Behavior
/// - `"0"`: removes the line
/// - above the limit: clamped
/// - negative / not a whole number: `INVALID_QUANTITY`
pub fn update_cart_item(
    cart: &CartState,
    product_id: &str,
    variant_id: Option<&str>,
    quantity: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, ?variant_id, quantity, "update_cart_item command");

    let key = LineKey::new(product_id, variant_id);
    cart.store().update_quantity_input(&key, quantity)?;

    Ok(cart_response(cart))
}

/// Removes a line. Removing an absent line succeeds.
pub fn remove_from_cart(cart: &CartState, product_id: &str, variant_id: Option<&str>) -> CartResponse {
    debug!(product_id, ?variant_id, "remove_from_cart command");

    cart.store().remove_line(&LineKey::new(product_id, variant_id));
    cart_response(cart)
}

/// Clears all lines.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.store().clear();
    cart_response(cart)
}

pub fn open_cart(cart: &CartState) -> CartUiResponse {
    cart.bridge().open();
    ui_response(cart)
}

pub fn close_cart(cart: &CartState) -> CartUiResponse {
    cart.bridge().close();
    ui_response(cart)
}
