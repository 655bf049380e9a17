//! # Persisted Cart Snapshot
//!
//! The JSON document written under the storage key after every mutation.
//!
//! ## Layout
//! ```text
//! {
//!   "lines": [
//!     { "productId": "p1", "variantId": "v2", "quantity": 2,
//!       "unitPrice": 8000, "compareAt": 10000,
//!       "selection": { "Size": "M" }, "title": "...", "addedAt": "..." }
//!   ],
//!   "version": 1
//! }
//! ```
//!
//! Anything that fails to parse, has another `version`, or breaks a line
//! invariant is rejected as a whole. The store then starts empty.

use std::collections::HashSet;

use finds_core::validation::validate_price_cents;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::error::{StorageError, StorageResult};

/// Current layout version.
pub const CART_SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub version: u32,
}

impl CartSnapshot {
    pub fn from_cart(cart: &Cart) -> Self {
        CartSnapshot {
            lines: cart.lines().to_vec(),
            version: CART_SNAPSHOT_VERSION,
        }
    }

    pub fn to_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses and validates a stored snapshot.
    pub fn from_json(raw: &str) -> StorageResult<Self> {
        let snapshot: CartSnapshot = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks the version and line invariants.
    pub fn validate(&self) -> StorageResult<()> {
        if self.version != CART_SNAPSHOT_VERSION {
            return Err(StorageError::VersionMismatch {
                found: self.version,
                expected: CART_SNAPSHOT_VERSION,
            });
        }

        let mut keys = HashSet::new();
        for line in &self.lines {
            if line.product_id.is_empty() {
                return Err(StorageError::Corrupt("line without product id".to_string()));
            }
            if line.quantity < 1 {
                return Err(StorageError::Corrupt(format!(
                    "line {} has quantity {}",
                    line.key(),
                    line.quantity
                )));
            }
            let prices = std::iter::once(line.unit_price).chain(line.compare_at);
            for price in prices {
                validate_price_cents(price.cents()).map_err(|err| {
                    StorageError::Corrupt(format!("line {}: {}", line.key(), err))
                })?;
            }
            if !keys.insert(line.key()) {
                return Err(StorageError::Corrupt(format!("duplicate line {}", line.key())));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "lines": [
            {"productId": "p1", "variantId": "v1", "quantity": 2,
             "unitPrice": 8000, "compareAt": 10000, "selection": {"Size": "M"}},
            {"productId": "p2", "variantId": null, "quantity": 1,
             "unitPrice": 2500, "compareAt": null, "selection": {}}
        ],
        "version": 1
    }"#;

    #[test]
    fn test_parses_minimal_layout() {
        let snapshot = CartSnapshot::from_json(VALID).unwrap();
        assert_eq!(snapshot.lines.len(), 2);
        assert_eq!(snapshot.lines[0].selection.get("Size"), Some("M"));
        assert_eq!(snapshot.lines[1].variant_id, None);
        assert_eq!(snapshot.lines[1].title, "");
    }

    #[test]
    fn test_rejects_other_version() {
        let raw = VALID.replace(r#""version": 1"#, r#""version": 2"#);
        assert!(matches!(
            CartSnapshot::from_json(&raw),
            Err(StorageError::VersionMismatch { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_rejects_garbage_and_bad_lines() {
        assert!(matches!(
            CartSnapshot::from_json("{not json"),
            Err(StorageError::Serialize(_))
        ));

        let zero_qty = VALID.replace(r#""quantity": 2"#, r#""quantity": 0"#);
        assert!(matches!(
            CartSnapshot::from_json(&zero_qty),
            Err(StorageError::Corrupt(_))
        ));

        let negative = VALID.replace(r#""unitPrice": 2500"#, r#""unitPrice": -1"#);
        assert!(matches!(
            CartSnapshot::from_json(&negative),
            Err(StorageError::Corrupt(_))
        ));

        let duplicate = VALID.replace(r#""productId": "p2", "variantId": null"#, r#""productId": "p1", "variantId": "v1""#);
        assert!(matches!(
            CartSnapshot::from_json(&duplicate),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn test_rejects_price_above_ceiling() {
        let huge = VALID.replace(r#""unitPrice": 8000"#, r#""unitPrice": 9223372036854775807"#);
        assert!(matches!(
            CartSnapshot::from_json(&huge),
            Err(StorageError::Corrupt(_))
        ));

        let huge_compare = VALID.replace(r#""compareAt": 10000"#, r#""compareAt": 100000001"#);
        assert!(CartSnapshot::from_json(&huge_compare).unwrap_err().is_corrupt());
    }
}
