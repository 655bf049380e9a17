//! # Option Availability
//!
//! Decides which option values a product card may still offer.
//!
//! ## Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  value V of option O is AVAILABLE when some variant:                   │
//! │                                                                         │
//! │    1. carries V for O                                                   │
//! │    2. agrees with every OTHER already-selected option                   │
//! │    3. has nonzero stock                                                 │
//! │                                                                         │
//! │  Options {Size:[S,M], Color:[Red,Blue]}                                 │
//! │  Variants (S,Red):0  (S,Blue):3  (M,Red):1                              │
//! │                                                                         │
//! │  selection {}        → Size S ✔ (via S/Blue)   Size M ✔                 │
//! │  selection {Size:S}  → Color Red ✘            Color Blue ✔             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The option's own current value is ignored, so a shopper can always switch
//! away from what they picked. Pure functions over the variant list.

use crate::selection::Selection;
use crate::types::{ProductOption, Variant};

/// Whether `value` can still be picked for `option_name`.
pub fn is_value_available(
    option_name: &str,
    value: &str,
    selection: &Selection,
    variants: &[Variant],
) -> bool {
    variants.iter().any(|variant| {
        variant.value_of(option_name) == Some(value)
            && selection.agrees_with(variant, Some(option_name))
            && variant.is_available()
    })
}

/// Values of `option` that are still selectable, in display order.
pub fn available_values<'a>(
    option: &'a ProductOption,
    selection: &Selection,
    variants: &[Variant],
) -> Vec<&'a str> {
    option
        .values
        .iter()
        .map(String::as_str)
        .filter(|value| is_value_available(&option.name, value, selection, variants))
        .collect()
}
