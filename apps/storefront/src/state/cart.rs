//! # Cart State
//!
//! The session's cart store plus the drawer bridge, shared by every cart
//! command.
//!
//! ## Thread Safety
//! `CartStore` locks internally, so this wrapper is plain `Arc`s and is
//! cheap to clone into whatever runtime hosts the commands.

use std::sync::Arc;

use finds_cart::{CartConfig, CartStorage, CartStore, CartUiBridge, FileStorage};
use tracing::info;

use crate::error::ApiError;
use crate::state::StorefrontConfig;

#[derive(Debug, Clone)]
pub struct CartState {
    store: Arc<CartStore>,
    bridge: CartUiBridge,
}

impl CartState {
    /// Opens the cart on an explicit storage backend.
    pub fn new(storage: Arc<dyn CartStorage>, config: CartConfig) -> Self {
        let store = Arc::new(CartStore::open(storage, config));
        let bridge = CartUiBridge::new(store.clone());
        CartState { store, bridge }
    }

    /// Opens the cart on file storage in the configured directory.
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let dir = config.storage_dir()?;
        let storage = FileStorage::new(&dir)?;
        info!(dir = %dir.display(), "Cart storage ready");
        Ok(Self::new(Arc::new(storage), config.cart.clone()))
    }

    /// Ephemeral cart, for tests and previews.
    pub fn in_memory(config: CartConfig) -> Self {
        let store = Arc::new(CartStore::in_memory(config));
        let bridge = CartUiBridge::new(store.clone());
        CartState { store, bridge }
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    pub fn bridge(&self) -> &CartUiBridge {
        &self.bridge
    }
}
