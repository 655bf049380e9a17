//! # Price Calculator
//!
//! Derives what a product card shows in its price row.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Variant resolved?                                                      │
//! │     │                                                                   │
//! │     ├── yes: current = variant.price ?? product.price                   │
//! │     │        compare = variant.compare_at ?? product.compare_at         │
//! │     │                                                                   │
//! │     └── no:  current = product.price, compare = product.compare_at      │
//! │                                                                         │
//! │  compare > current ?                                                    │
//! │     ├── yes: show  $80.00  ~~$100.00~~   [-20% OFF]                     │
//! │     └── no:  show  $80.00                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, Variant};

/// Price row for one product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceDisplay {
    /// What the shopper pays.
    pub current: Money,

    /// Strike-through price. Only present when above `current`.
    pub compare_at: Option<Money>,

    /// Whole percent saved, rounded down. Present iff `compare_at` is.
    pub discount_percent: Option<u8>,
}

impl PriceDisplay {
    #[inline]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at.is_some()
    }

    /// Amount saved per unit.
    pub fn savings(&self) -> Money {
        self.compare_at
            .map(|compare_at| compare_at - self.current)
            .unwrap_or_default()
    }
}

/// Computes the price row from the product and the resolved variant, if any.
pub fn compute_price(product: &Product, variant: Option<&Variant>) -> PriceDisplay {
    let current = variant.and_then(|v| v.price).unwrap_or(product.price);
    let compare_at = variant
        .and_then(|v| v.compare_at)
        .or(product.compare_at)
        .filter(|compare_at| *compare_at > current);

    PriceDisplay {
        current,
        compare_at,
        discount_percent: compare_at.and_then(|compare_at| discount_percent(current, compare_at)),
    }
}

/// `floor(100 * (compare_at - current) / compare_at)`, or `None` when there is
/// no discount.
///
/// ## Example
/// ```rust
/// use finds_core::money::Money;
/// use finds_core::pricing::discount_percent;
///
/// assert_eq!(discount_percent(Money::from_cents(8000), Money::from_cents(10000)), Some(20));
/// assert_eq!(discount_percent(Money::from_cents(100), Money::from_cents(100)), None);
/// ```
pub fn discount_percent(current: Money, compare_at: Money) -> Option<u8> {
    if compare_at <= current || !compare_at.is_positive() {
        return None;
    }
    // i128 keeps 100 * delta from overflowing on absurd prices
    let saved = (compare_at - current).cents() as i128;
    let percent = (100 * saved) / compare_at.cents() as i128;
    u8::try_from(percent.clamp(0, 100)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Inventory;

    fn product(price: i64, compare_at: Option<i64>) -> Product {
        Product {
            id: "p1".to_string(),
            title: "Carhartt Chore Coat".to_string(),
            slug: "carhartt-chore-coat".to_string(),
            description: None,
            price: Money::from_cents(price),
            compare_at: compare_at.map(Money::from_cents),
            options: vec![],
            variants: vec![],
            tags: vec![],
            attributes: Default::default(),
            featured: false,
            images: vec![],
            stock: Inventory::default(),
        }
    }

    fn variant(price: Option<i64>, compare_at: Option<i64>) -> Variant {
        Variant {
            id: "v1".to_string(),
            options: Default::default(),
            price: price.map(Money::from_cents),
            compare_at: compare_at.map(Money::from_cents),
            stock: Inventory::default(),
            image: None,
        }
    }

    #[test]
    fn test_twenty_percent_off() {
        let display = compute_price(&product(8000, Some(10000)), None);
        assert_eq!(display.current.cents(), 8000);
        assert_eq!(display.compare_at, Some(Money::from_cents(10000)));
        assert_eq!(display.discount_percent, Some(20));
        assert_eq!(display.savings().cents(), 2000);
    }

    #[test]
    fn test_compare_at_hidden_unless_greater() {
        let equal = compute_price(&product(5000, Some(5000)), None);
        assert_eq!(equal.compare_at, None);
        assert_eq!(equal.discount_percent, None);
        assert!(!equal.is_on_sale());

        let lower = compute_price(&product(5000, Some(4000)), None);
        assert_eq!(lower.compare_at, None);
        assert_eq!(lower.discount_percent, None);
    }

    #[test]
    fn test_variant_overrides_and_fallbacks() {
        let p = product(5000, Some(9000));

        // Variant price, product compare-at.
        let display = compute_price(&p, Some(&variant(Some(4500), None)));
        assert_eq!(display.current.cents(), 4500);
        assert_eq!(display.compare_at, Some(Money::from_cents(9000)));
        assert_eq!(display.discount_percent, Some(50));

        // Variant without price falls back entirely.
        let display = compute_price(&p, Some(&variant(None, None)));
        assert_eq!(display.current.cents(), 5000);

        // Variant compare-at wins over product compare-at.
        let display = compute_price(&p, Some(&variant(None, Some(6000))));
        assert_eq!(display.compare_at, Some(Money::from_cents(6000)));
        assert_eq!(display.discount_percent, Some(16));
    }

    #[test]
    fn test_discount_rounds_down() {
        // 1/3 off = 33.33% → 33
        assert_eq!(
            discount_percent(Money::from_cents(2000), Money::from_cents(3000)),
            Some(33)
        );
        // 66.67% → 66
        assert_eq!(
            discount_percent(Money::from_cents(1000), Money::from_cents(3000)),
            Some(66)
        );
    }

    #[test]
    fn test_free_item_is_full_discount() {
        assert_eq!(
            discount_percent(Money::zero(), Money::from_cents(1500)),
            Some(100)
        );
    }
}
