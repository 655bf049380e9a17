//! # finds-core: Pure Storefront Logic for Vintage Finds
//!
//! This crate is the headless half of the storefront's product card. It
//! contains everything that decides *what* a product card shows, as pure
//! functions with zero I/O dependencies. Rendering lives elsewhere.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Vintage Finds Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Rendering layer (any)                        │   │
//! │  │    Product card ──► Option buttons ──► Cart drawer ──► Badge    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ finds-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐ ┌───────────┐ ┌───────────┐ ┌──────────────┐  │   │
//! │  │   │availability│ │ resolver  │ │  pricing  │ │     view     │  │   │
//! │  │   │ is value   │ │ selection │ │ current / │ │ headless     │  │   │
//! │  │   │ selectable │ │ → variant │ │ compareAt │ │ product card │  │   │
//! │  │   └────────────┘ └───────────┘ └───────────┘ └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 finds-cart (Cart store layer)                   │   │
//! │  │          Cart lines, totals, persisted snapshot, signals        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Product, ProductOption, Variant, Collection)
//! - [`money`] - Money type with integer arithmetic (minor units)
//! - [`selection`] - Partial option selection owned by one product view
//! - [`availability`] - Which option values are still selectable
//! - [`resolver`] - Selection → variant, or `NoMatch`
//! - [`pricing`] - Current / compare-at / discount percentage
//! - [`attributes`] - Brand and condition lookup (with the tag shim)
//! - [`catalog`] - Catalog provider port and listing filters
//! - [`view`] - Headless product card logic
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use finds_core::money::Money;
//! use finds_core::pricing::discount_percent;
//!
//! let current = Money::from_cents(8000);
//! let compare_at = Money::from_cents(10000);
//! assert_eq!(discount_percent(current, compare_at), Some(20));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod attributes;
pub mod availability;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod resolver;
pub mod selection;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use selection::Selection;
pub use types::*;
pub use view::{LineDraft, ProductView};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts. Overridable through the cart configuration.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (typing 1000 instead of 10).
/// Quantity updates above this are clamped, not rejected.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted unit or compare-at price, in cents ($1,000,000.00).
///
/// ## Business Reason
/// Keeps `price × quantity` and cart totals far inside `i64`. Catalog
/// records and restored cart lines above this are rejected.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
