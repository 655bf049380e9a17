//! Cart limits and the storage key.
//!
//! Lives under `[cart]` in the storefront config file:
//!
//! ```toml
//! [cart]
//! max_quantity = 999
//! max_lines = 100
//! storage_key = "vintage-finds:cart"
//! ```

use finds_core::{MAX_CART_LINES, MAX_ITEM_QUANTITY};
use serde::{Deserialize, Serialize};

/// Default key the cart snapshot is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "vintage-finds:cart";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Per-line quantity cap. Larger updates are clamped.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: i64,

    /// Distinct line cap.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_max_quantity() -> i64 {
    MAX_ITEM_QUANTITY
}

fn default_max_lines() -> usize {
    MAX_CART_LINES
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            max_quantity: default_max_quantity(),
            max_lines: default_max_lines(),
            storage_key: default_storage_key(),
        }
    }
}

impl CartConfig {
    /// Returns a description of the first invalid setting, if any.
    pub fn problem(&self) -> Option<String> {
        if self.max_quantity < 1 {
            return Some(format!("cart.max_quantity must be at least 1, got {}", self.max_quantity));
        }
        if self.max_lines == 0 {
            return Some("cart.max_lines must be at least 1".to_string());
        }
        if self.storage_key.trim().is_empty() {
            return Some("cart.storage_key must not be empty".to_string());
        }
        None
    }

    /// Replaces each invalid setting with its default, keeping the rest.
    pub fn or_defaults(mut self) -> Self {
        if self.max_quantity < 1 {
            self.max_quantity = default_max_quantity();
        }
        if self.max_lines == 0 {
            self.max_lines = default_max_lines();
        }
        if self.storage_key.trim().is_empty() {
            self.storage_key = default_storage_key();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.max_quantity, 999);
        assert_eq!(config.max_lines, 100);
        assert_eq!(config.storage_key, "vintage-finds:cart");
        assert!(config.problem().is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CartConfig = serde_json::from_str(r#"{"max_quantity": 10}"#).unwrap();
        assert_eq!(config.max_quantity, 10);
        assert_eq!(config.max_lines, 100);
    }

    #[test]
    fn test_problem_detection() {
        let config = CartConfig {
            max_quantity: 0,
            ..Default::default()
        };
        assert!(config.problem().is_some());
    }

    #[test]
    fn test_or_defaults_fixes_only_bad_settings() {
        let config = CartConfig {
            max_quantity: 0,
            max_lines: 7,
            storage_key: " ".to_string(),
        }
        .or_defaults();

        assert_eq!(config.max_quantity, 999);
        assert_eq!(config.max_lines, 7);
        assert_eq!(config.storage_key, "vintage-finds:cart");
        assert!(config.problem().is_none());
    }
}
