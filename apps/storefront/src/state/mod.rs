//! # State Module
//!
//! Separate state types, each command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │ StorefrontConfig │  │   CatalogState   │  │      CartState       │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  store name      │  │  products        │  │  Arc<CartStore>      │  │
//! │  │  currency        │  │  collections     │  │  CartUiBridge        │  │
//! │  │  cart limits     │  │  (JSON file)     │  │  (file snapshot)     │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StorefrontConfig, CatalogState: read-only after startup             │
//! │  • CartState: CartStore holds its own Mutex                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::CartState;
pub use catalog::{CatalogError, CatalogState};
pub use config::{
    CatalogSettings, ConfigError, ConfigResult, StorageSettings, StoreSettings, StorefrontConfig,
};
