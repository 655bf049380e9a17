//! # Cart Store
//!
//! The single shared cart of a storefront session.
//!
//! ## Thread Safety
//! The cart sits behind one `Mutex`. Every mutation takes the lock, changes
//! the lines, writes the full snapshot and publishes the new totals before
//! releasing it, so two concurrent adds can never persist out of order.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command                  CartStore (lock held)            Observers    │
//! │  ───────                  ─────────────────────            ─────────    │
//! │                                                                         │
//! │  add_to_cart ──► add_line ──► Cart::add_line                            │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                        CartSnapshot ──► CartStorage::save               │
//! │                                   │        (failure logged, cart kept)  │
//! │                                   ▼                                     │
//! │                        watch<CartSummary> ─────────────► badge          │
//! │                        broadcast<CartEvent> ───────────► listeners      │
//! │                          "cart:changed"                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Hydration
//! [`CartStore::open`] loads the last snapshot. Missing means empty.
//! Unreadable, corrupt, or another version also means empty, with a warning.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use finds_core::validation;
use finds_core::{LineDraft, Money};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};
use ts_rs::TS;

use crate::bridge::CartEvent;
use crate::cart::{Cart, CartLine, CartTotals, LineKey};
use crate::config::CartConfig;
use crate::error::CartResult;
use crate::snapshot::CartSnapshot;
use crate::storage::{CartStorage, MemoryStorage};

/// Capacity of the event channel. Slow listeners skip ahead.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// What chrome elements need to know after every change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub total_items: i64,
    pub total_price: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

/// Shared, persisted cart.
#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    storage: Arc<dyn CartStorage>,
    config: CartConfig,
    summary_tx: watch::Sender<CartSummary>,
    events_tx: broadcast::Sender<CartEvent>,
}

impl CartStore {
    /// Opens the store, hydrating from `storage`.
    ///
    /// Invalid limits or an empty storage key fall back to their defaults
    /// with a warning.
    pub fn open(storage: Arc<dyn CartStorage>, config: CartConfig) -> Self {
        let config = match config.problem() {
            Some(problem) => {
                warn!(%problem, "Invalid cart config, using defaults for bad settings");
                config.or_defaults()
            }
            None => config,
        };

        let cart = hydrate(storage.as_ref(), &config);
        let (summary_tx, _) = watch::channel(CartSummary::from(&cart));
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        CartStore {
            cart: Mutex::new(cart),
            storage,
            config,
            summary_tx,
            events_tx,
        }
    }

    /// A store backed by [`MemoryStorage`].
    pub fn in_memory(config: CartConfig) -> Self {
        Self::open(Arc::new(MemoryStorage::new()), config)
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of the drafted item. See [`Cart::add_line`].
    pub fn add_line(&self, draft: LineDraft) -> CartResult<i64> {
        let key = LineKey {
            product_id: draft.product_id.clone(),
            variant_id: draft.variant_id.clone(),
        };
        let result = self.mutate(|cart| cart.add_line(draft));
        match &result {
            Ok(quantity) => info!(key = %key, quantity, "Added to cart"),
            Err(err) => warn!(key = %key, error = %err, "Add to cart rejected"),
        }
        result
    }

    /// Sets a line's quantity. See [`Cart::update_quantity`].
    pub fn update_quantity(&self, key: &LineKey, quantity: i64) -> CartResult<Option<i64>> {
        let result = self.mutate(|cart| cart.update_quantity(key, quantity));
        if let Ok(stored) = &result {
            debug!(key = %key, requested = quantity, stored = ?stored, "Quantity updated");
        }
        result
    }

    /// Like [`update_quantity`](Self::update_quantity), from raw shopper input.
    pub fn update_quantity_input(&self, key: &LineKey, input: &str) -> CartResult<Option<i64>> {
        let quantity = validation::parse_quantity(input)?;
        self.update_quantity(key, quantity)
    }

    /// Removes a line. Removing an absent line is not an error.
    pub fn remove_line(&self, key: &LineKey) -> bool {
        let removed = self
            .mutate(|cart| Ok(cart.remove_line(key)))
            .unwrap_or(false);
        debug!(key = %key, removed, "Remove line");
        removed
    }

    pub fn clear(&self) {
        let _ = self.mutate(|cart| {
            cart.clear();
            Ok(())
        });
        info!("Cart cleared");
    }

    /// Writes the current snapshot now, e.g. to retry after a failed save.
    pub fn persist(&self) -> CartResult<()> {
        let cart = self.lock();
        self.write_snapshot(&cart)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    pub fn lines(&self) -> Vec<CartLine> {
        self.with_cart(|cart| cart.lines().to_vec())
    }

    pub fn total_items(&self) -> i64 {
        self.with_cart(Cart::total_items)
    }

    pub fn total_price(&self) -> Money {
        self.with_cart(Cart::total_price)
    }

    pub fn totals(&self) -> CartTotals {
        self.with_cart(|cart| CartTotals::from(cart))
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(CartSnapshot::from_cart)
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Latest totals, updated after every mutation.
    pub fn watch_summary(&self) -> watch::Receiver<CartSummary> {
        self.summary_tx.subscribe()
    }

    /// Cart events (`cart:changed`, plus drawer events from the bridge).
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events_tx.subscribe()
    }

    pub(crate) fn emit(&self, event: CartEvent) {
        // No listeners is fine.
        let _ = self.events_tx.send(event);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` and, on success, persists and notifies under the same lock.
    fn mutate<F, R>(&self, f: F) -> CartResult<R>
    where
        F: FnOnce(&mut Cart) -> CartResult<R>,
    {
        let mut cart = self.lock();
        let result = f(&mut cart)?;

        if let Err(err) = self.write_snapshot(&cart) {
            error!(error = %err, "Failed to persist cart, keeping in-memory state");
        }

        let summary = CartSummary::from(&*cart);
        self.summary_tx.send_replace(summary);
        self.emit(CartEvent::Changed {
            total_items: summary.total_items,
            total_price: summary.total_price,
        });

        Ok(result)
    }

    fn write_snapshot(&self, cart: &Cart) -> CartResult<()> {
        let payload = CartSnapshot::from_cart(cart).to_json()?;
        self.storage.save(&self.config.storage_key, &payload)?;
        Ok(())
    }
}

/// Loads the last snapshot, falling back to an empty cart.
fn hydrate(storage: &dyn CartStorage, config: &CartConfig) -> Cart {
    let key = config.storage_key.as_str();

    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No saved cart, starting empty");
            return Cart::new(config);
        }
        Err(err) => {
            warn!(key, error = %err, "Could not read saved cart, starting empty");
            return Cart::new(config);
        }
    };

    match CartSnapshot::from_json(&raw) {
        Ok(snapshot) => {
            let cart = Cart::from_lines(snapshot.lines, config);
            info!(key, lines = cart.line_count(), items = cart.total_items(), "Cart restored");
            cart
        }
        Err(err) => {
            warn!(key, error = %err, "Discarding corrupt cart snapshot");
            Cart::new(config)
        }
    }
}
