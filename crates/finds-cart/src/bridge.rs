//! # Cart UI Bridge
//!
//! Relays drawer state and the item count to storefront chrome (header badge,
//! cart drawer). Holds no business rules; it only forwards what the store
//! already knows.
//!
//! ```text
//!   header cart icon ──click──► open() ──► watch<bool> = true
//!                                      └─► "cart:opened"
//!   drawer ✕ ─────────────────► close() ─► watch<bool> = false
//!                                      └─► "cart:closed"
//!   CartStore mutation ─────────────────► "cart:changed" { totalItems, totalPrice }
//!   badge ◄── badge_label(total_items): "" | "3" | "99+"
//! ```

use std::sync::Arc;

use finds_core::Money;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::debug;
use ts_rs::TS;

use crate::store::{CartStore, CartSummary};

/// Counts above this show as `"99+"`.
pub const BADGE_MAX: i64 = 99;

/// Events published to presentation listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event")]
#[ts(export)]
pub enum CartEvent {
    #[serde(rename = "cart:opened")]
    Opened,

    #[serde(rename = "cart:closed")]
    Closed,

    #[serde(rename = "cart:changed")]
    Changed {
        #[serde(rename = "totalItems")]
        total_items: i64,
        #[serde(rename = "totalPrice")]
        total_price: Money,
    },
}

impl CartEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::Opened => "cart:opened",
            CartEvent::Closed => "cart:closed",
            CartEvent::Changed { .. } => "cart:changed",
        }
    }
}

/// Badge text for a total item count.
///
/// ## Example
/// ```rust
/// use finds_cart::bridge::badge_label;
///
/// assert_eq!(badge_label(0), "");
/// assert_eq!(badge_label(7), "7");
/// assert_eq!(badge_label(120), "99+");
/// ```
pub fn badge_label(total_items: i64) -> String {
    match total_items {
        n if n <= 0 => String::new(),
        n if n > BADGE_MAX => format!("{}+", BADGE_MAX),
        n => n.to_string(),
    }
}

/// Drawer state plus derived counters for chrome elements.
#[derive(Debug, Clone)]
pub struct CartUiBridge {
    store: Arc<CartStore>,
    open_tx: Arc<watch::Sender<bool>>,
}

impl CartUiBridge {
    /// Starts with the drawer closed.
    pub fn new(store: Arc<CartStore>) -> Self {
        let (open_tx, _) = watch::channel(false);
        CartUiBridge {
            store,
            open_tx: Arc::new(open_tx),
        }
    }

    pub fn store(&self) -> &Arc<CartStore> {
        &self.store
    }

    pub fn open(&self) {
        self.set_open(true);
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    pub fn is_open(&self) -> bool {
        *self.open_tx.borrow()
    }

    pub fn total_items(&self) -> i64 {
        self.store.total_items()
    }

    pub fn badge_label(&self) -> String {
        badge_label(self.total_items())
    }

    pub fn watch_open(&self) -> watch::Receiver<bool> {
        self.open_tx.subscribe()
    }

    pub fn watch_summary(&self) -> watch::Receiver<CartSummary> {
        self.store.watch_summary()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.store.subscribe()
    }

    /// Emits only on an actual transition.
    fn set_open(&self, open: bool) {
        let was_open = self.open_tx.send_replace(open);
        if was_open == open {
            return;
        }
        debug!(open, "Cart drawer toggled");
        self.store
            .emit(if open { CartEvent::Opened } else { CartEvent::Closed });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CartConfig;
    use finds_core::{LineDraft, Selection};

    fn bridge() -> CartUiBridge {
        CartUiBridge::new(Arc::new(CartStore::in_memory(CartConfig::default())))
    }

    fn draft(price: i64) -> LineDraft {
        LineDraft {
            product_id: "p1".to_string(),
            variant_id: None,
            title: "Carhartt Beanie".to_string(),
            unit_price: Money::from_cents(price),
            compare_at: None,
            selection: Selection::new(),
            purchasable: true,
        }
    }

    #[test]
    fn test_badge_label() {
        assert_eq!(badge_label(0), "");
        assert_eq!(badge_label(1), "1");
        assert_eq!(badge_label(99), "99");
        assert_eq!(badge_label(100), "99+");
    }

    #[test]
    fn test_open_close() {
        let bridge = bridge();
        assert!(!bridge.is_open());

        bridge.open();
        assert!(bridge.is_open());
        bridge.toggle();
        assert!(!bridge.is_open());
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(CartEvent::Changed {
            total_items: 2,
            total_price: Money::from_cents(1998),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"event": "cart:changed", "totalItems": 2, "totalPrice": 1998})
        );
        assert_eq!(
            serde_json::to_value(CartEvent::Opened).unwrap(),
            serde_json::json!({"event": "cart:opened"})
        );
    }

    #[tokio::test]
    async fn test_events_reach_listeners() {
        let bridge = bridge();
        let mut events = bridge.subscribe();

        bridge.open();
        bridge.open(); // no transition, no event
        bridge.store().add_line(draft(500)).unwrap();
        bridge.close();

        assert_eq!(events.recv().await.unwrap(), CartEvent::Opened);
        assert_eq!(
            events.recv().await.unwrap(),
            CartEvent::Changed {
                total_items: 1,
                total_price: Money::from_cents(500),
            }
        );
        assert_eq!(events.recv().await.unwrap().name(), "cart:closed");
        assert_eq!(bridge.badge_label(), "1");
    }

    #[tokio::test]
    async fn test_summary_watch_wakes_on_change() {
        let bridge = bridge();
        let mut summary = bridge.watch_summary();

        bridge.store().add_line(draft(250)).unwrap();
        summary.changed().await.unwrap();
        assert_eq!(summary.borrow().total_items, 1);
    }
}
