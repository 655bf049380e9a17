//! # Cart Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError ──► logged by CartStore, cart reset or kept in memory     │
//! │                                                                         │
//! │  CoreError (finds-core)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartError (this module) ──► ApiError (storefront app)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use finds_core::CoreError;
use thiserror::Error;

use crate::cart::LineKey;

/// Persistence port errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The stored snapshot parsed but breaks a cart invariant.
    ///
    /// ## When This Occurs
    /// - Zero or negative quantity
    /// - Captured price outside `0..=MAX_PRICE_CENTS`
    /// - Two lines with the same key
    #[error("Persisted cart is corrupt: {0}")]
    Corrupt(String),

    /// The stored snapshot was written by an incompatible layout.
    #[error("Persisted cart version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}

impl StorageError {
    /// Whether the stored data itself is bad (as opposed to the medium).
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            StorageError::Serialize(_) | StorageError::Corrupt(_) | StorageError::VersionMismatch { .. }
        )
    }
}

/// Cart operation errors.
#[derive(Debug, Error)]
pub enum CartError {
    /// The caller marked the item as not purchasable. Nothing changed.
    #[error("Product {product_id} is out of stock")]
    OutOfStock { product_id: String },

    /// Quantity was negative or not a whole number.
    #[error("Invalid quantity: '{input}'")]
    InvalidQuantity { input: String },

    /// Adding a new line would exceed the configured line limit.
    #[error("Cart cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// Quantity update for a line that is not in the cart.
    #[error("Line not in cart: {0}")]
    LineNotFound(LineKey),

    #[error(transparent)]
    Core(CoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<CoreError> for CartError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OutOfStock { product_id } => CartError::OutOfStock { product_id },
            CoreError::InvalidQuantity { input } => CartError::InvalidQuantity { input },
            other => CartError::Core(other),
        }
    }
}

/// Result type for cart operations.
pub type CartResult<T> = Result<T, CartError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_are_flattened() {
        let err: CartError = CoreError::InvalidQuantity {
            input: "2.5".to_string(),
        }
        .into();
        assert!(matches!(err, CartError::InvalidQuantity { ref input } if input == "2.5"));

        let err: CartError = CoreError::ProductNotFound("p9".to_string()).into();
        assert!(matches!(err, CartError::Core(_)));
    }

    #[test]
    fn test_corrupt_classification() {
        assert!(StorageError::Corrupt("dup".to_string()).is_corrupt());
        assert!(StorageError::VersionMismatch { found: 2, expected: 1 }.is_corrupt());
        assert!(!StorageError::Io(std::io::Error::other("disk")).is_corrupt());
    }
}
