//! # finds-cart: Cart Store for Vintage Finds
//!
//! The cart half of the storefront: lines, totals, persistence and the
//! signals the chrome listens to.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductView::line_draft() (finds-core)                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  CartStore   Mutex<Cart> + Arc<dyn CartStorage>                 │    │
//! │  │     │                                                           │    │
//! │  │     ├──► CartSnapshot (JSON, versioned) ──► Memory / File       │    │
//! │  │     └──► watch<CartSummary> + broadcast<CartEvent>              │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  CartUiBridge   drawer open/close, badge label                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//!
//! use finds_cart::{CartConfig, CartStore, CartUiBridge};
//! use finds_core::{LineDraft, Money, Selection};
//!
//! let store = Arc::new(CartStore::in_memory(CartConfig::default()));
//! let bridge = CartUiBridge::new(store.clone());
//!
//! let draft = LineDraft {
//!     product_id: "levis-501".to_string(),
//!     variant_id: Some("levis-501-32".to_string()),
//!     title: "Levi's 501".to_string(),
//!     unit_price: Money::from_cents(4500),
//!     compare_at: None,
//!     selection: Selection::from_pairs([("Waist", "32")]),
//!     purchasable: true,
//! };
//! store.add_line(draft.clone()).unwrap();
//! store.add_line(draft).unwrap();
//!
//! assert_eq!(store.total_items(), 2);
//! assert_eq!(store.total_price(), Money::from_cents(9000));
//! assert_eq!(bridge.badge_label(), "2");
//! ```

pub mod bridge;
pub mod cart;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use bridge::{CartEvent, CartUiBridge};
pub use cart::{Cart, CartLine, CartTotals, LineKey};
pub use config::CartConfig;
pub use error::{CartError, CartResult, StorageError, StorageResult};
pub use snapshot::{CartSnapshot, CART_SNAPSHOT_VERSION};
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::{CartStore, CartSummary};
