//! # Validation Module
//!
//! Input validation for catalog records and shopper input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Renderer                                                      │
//! │  └── Only offers available option values, numeric steppers             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands (Rust)                                               │
//! │  └── THIS MODULE: quantity parsing, "Name=Value" parsing               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog load                                                  │
//! │  └── THIS MODULE: variant coverage + combination uniqueness            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::selection::Selection;
use crate::types::Product;
use crate::MAX_PRICE_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity
// =============================================================================

/// Parses a quantity typed by the shopper.
///
/// ## Rules
/// - Must be a whole number (`"2"` ok, `"2.5"` / `"two"` rejected)
/// - Must not be negative (`"0"` is allowed and means "remove")
///
/// ## Example
/// ```rust
/// use finds_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
/// assert!(parse_quantity("1.5").is_err());
/// assert!(parse_quantity("-1").is_err());
/// ```
pub fn parse_quantity(input: &str) -> CoreResult<i64> {
    let qty: i64 = input
        .trim()
        .parse()
        .map_err(|_| CoreError::InvalidQuantity {
            input: input.to_string(),
        })?;
    validate_quantity_update(qty)?;
    Ok(qty)
}

/// Rejects negative quantity updates. Zero passes (it removes the line).
pub fn validate_quantity_update(qty: i64) -> CoreResult<()> {
    if qty < 0 {
        return Err(CoreError::InvalidQuantity {
            input: qty.to_string(),
        });
    }
    Ok(())
}

/// Clamps a positive quantity to `max`.
///
/// ## Example
/// ```rust
/// use finds_core::validation::clamp_quantity;
///
/// assert_eq!(clamp_quantity(5, 999), 5);
/// assert_eq!(clamp_quantity(5000, 999), 999);
/// ```
#[inline]
pub fn clamp_quantity(qty: i64, max: i64) -> i64 {
    qty.min(max)
}

// =============================================================================
// Money
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (free items are allowed)
/// - Must not exceed [`MAX_PRICE_CENTS`]
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Option Selection Input
// =============================================================================

/// Parses `"Name=Value"` into a pair. Both sides are trimmed and non-empty.
pub fn parse_option_pair(input: &str) -> ValidationResult<(String, String)> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "option".to_string(),
            reason: format!("expected Name=Value, got '{}'", input),
        })?;

    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        return Err(ValidationError::Required {
            field: "option".to_string(),
        });
    }

    Ok((name.to_string(), value.to_string()))
}

/// Checks that every picked option exists on the product and offers the
/// picked value.
pub fn validate_selection(product: &Product, selection: &Selection) -> ValidationResult<()> {
    for (name, value) in selection.iter() {
        let option = product.option(name).ok_or_else(|| ValidationError::NotAllowed {
            field: "option".to_string(),
            allowed: product.option_names().map(str::to_string).collect(),
        })?;

        if !option.values.iter().any(|v| v == value) {
            return Err(ValidationError::NotAllowed {
                field: name.to_string(),
                allowed: option.values.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Catalog Records
// =============================================================================

/// Validates one catalog product.
///
/// ## Rules
/// - id, title, slug are non-empty
/// - prices are within `0..=MAX_PRICE_CENTS`
/// - each variant covers every option exactly once, with a listed value
/// - variant ids and option combinations are unique within the product
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    for (field, value) in [
        ("id", &product.id),
        ("title", &product.title),
        ("slug", &product.slug),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    validate_price_cents(product.price.cents())?;
    if let Some(compare_at) = product.compare_at {
        validate_price_cents(compare_at.cents())?;
    }

    let mut ids = HashSet::new();
    let mut combinations = HashSet::new();

    for variant in &product.variants {
        if !ids.insert(variant.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "variant id".to_string(),
                value: variant.id.clone(),
            });
        }

        if let Some(price) = variant.price {
            validate_price_cents(price.cents())?;
        }

        if variant.options.len() != product.options.len() {
            return Err(ValidationError::InvalidFormat {
                field: format!("variant {}", variant.id),
                reason: format!(
                    "covers {} options, product has {}",
                    variant.options.len(),
                    product.options.len()
                ),
            });
        }

        let selection = Selection::from(variant.options.clone());
        validate_selection(product, &selection)?;

        if !combinations.insert(&variant.options) {
            return Err(ValidationError::Duplicate {
                field: "variant combination".to_string(),
                value: variant
                    .options
                    .iter()
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
