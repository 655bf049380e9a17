//! # Error Types
//!
//! Domain-specific error types for finds-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  finds-core errors (this file)                                         │
//! │  ├── CoreError        - Variant / stock / quantity failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  finds-cart errors (separate crate)                                    │
//! │  ├── CartError        - Cart store operation failures                  │
//! │  └── StorageError     - Persistence port failures                      │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the renderer sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → ApiError → Renderer   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is recoverable locally. The worst user-visible outcome is
//! a disabled "Add to Cart" button or an inline message.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Why a selection did not resolve to a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoMatchReason {
    /// One or more product options have no chosen value yet.
    Incomplete { missing: Vec<String> },

    /// Every option is chosen but no variant carries that combination.
    NoVariant,
}

impl std::fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoMatchReason::Incomplete { missing } => {
                write!(f, "selection incomplete, missing {}", missing.join(", "))
            }
            NoMatchReason::NoVariant => write!(f, "no variant has this combination"),
        }
    }
}

/// Core storefront errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Variant resolution failed.
    ///
    /// ## When This Occurs
    /// - The shopper has not picked a value for every option
    /// - The picked combination does not exist for this product
    ///
    /// ## User Workflow
    /// ```text
    /// Size: [S] [M]      Color: [Red] [Blue]
    ///        ▲                    (nothing picked)
    ///        │
    ///        ▼
    /// resolve() → NoMatch { Incomplete { missing: ["Color"] } }
    ///        │
    ///        ▼
    /// "Add to Cart" stays disabled
    /// ```
    #[error("No matching variant for product {product_id}: {reason}")]
    NoMatch {
        product_id: String,
        reason: NoMatchReason,
    },

    /// Add attempted on an item that is not purchasable.
    #[error("{product_id} is out of stock")]
    OutOfStock { product_id: String },

    /// Quantity update was negative or not an integer.
    #[error("Invalid quantity: {input}")]
    InvalidQuantity { input: String },

    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when catalog records or user input break a structural rule,
/// before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. "Size" instead of "Size=M").
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. two variants with the same combination).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_messages() {
        let err = CoreError::NoMatch {
            product_id: "jacket-1".to_string(),
            reason: NoMatchReason::Incomplete {
                missing: vec!["Color".to_string(), "Size".to_string()],
            },
        };
        assert_eq!(
            err.to_string(),
            "No matching variant for product jacket-1: selection incomplete, missing Color, Size"
        );

        let err = CoreError::NoMatch {
            product_id: "jacket-1".to_string(),
            reason: NoMatchReason::NoVariant,
        };
        assert!(err.to_string().ends_with("no variant has this combination"));
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "slug".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: slug is required");
    }
}
