//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vintage Finds                          │
//! │                                                                         │
//! │  Renderer                    Rust Commands                              │
//! │  ────────                    ─────────────                              │
//! │                                                                         │
//! │  invoke('add_to_cart')                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Resolver? ──── CoreError::NoMatch ───────────┐                  │  │
//! │  │         │                                     │                  │  │
//! │  │         ▼                                     ▼                  │  │
//! │  │  Cart? ──────── CartError::OutOfStock ──── ApiError ───────────► │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────► │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  e.code = "OUT_OF_STOCK"  →  "Sold out" toast, button stays disabled    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use finds_cart::{CartError, StorageError};
use finds_core::{CoreError, ValidationError};
use serde::Serialize;

use crate::state::{CatalogError, ConfigError};

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NO_MATCH",
///   "message": "No matching variant for product p1: selection incomplete, missing Color"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product, collection or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Selection does not resolve to a variant
    NoMatch,

    /// Item is not purchasable
    OutOfStock,

    /// Quantity was negative or not a whole number
    InvalidQuantity,

    /// Cart limit reached
    CartError,

    /// Cart storage could not be read or written
    StorageError,

    /// Configuration or catalog could not be loaded
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoMatch { .. } => ApiError::new(ErrorCode::NoMatch, err.to_string()),
            CoreError::OutOfStock { .. } => ApiError::new(ErrorCode::OutOfStock, err.to_string()),
            CoreError::InvalidQuantity { .. } => {
                ApiError::new(ErrorCode::InvalidQuantity, err.to_string())
            }
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts cart errors to API errors.
impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::OutOfStock { .. } => ApiError::new(ErrorCode::OutOfStock, err.to_string()),
            CartError::InvalidQuantity { .. } => {
                ApiError::new(ErrorCode::InvalidQuantity, err.to_string())
            }
            CartError::TooManyLines { .. } => ApiError::new(ErrorCode::CartError, err.to_string()),
            CartError::LineNotFound(key) => ApiError::not_found("Cart line", &key.to_string()),
            CartError::Core(e) => e.into(),
            CartError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!("Cart storage failed: {}", err);
        ApiError::new(ErrorCode::StorageError, "Cart storage is unavailable")
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Invalid(e) => {
                ApiError::new(ErrorCode::ConfigError, format!("Catalog is invalid: {}", e))
            }
            other => ApiError::new(ErrorCode::ConfigError, other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("Failed to encode response: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use finds_core::error::NoMatchReason;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::NoMatch {
            product_id: "p1".to_string(),
            reason: NoMatchReason::Incomplete {
                missing: vec!["Color".to_string()],
            },
        }
        .into();
        assert_eq!(err.code, ErrorCode::NoMatch);
        assert!(err.message.contains("Color"));

        let err: ApiError = CoreError::ProductNotFound("levis".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_cart_error_codes() {
        let err: ApiError = CartError::OutOfStock {
            product_id: "p1".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::OutOfStock);

        let err: ApiError = CartError::InvalidQuantity {
            input: "-1".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::OutOfStock, "sold out");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"code": "OUT_OF_STOCK", "message": "sold out"})
        );
    }
}
