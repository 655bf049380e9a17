//! # Product Attributes
//!
//! Brand and condition for a product.
//!
//! The structured [`ProductAttributes`] on the record always wins. Older
//! catalog records only carry flat tags (`["Levi's", "Good Condition"]`);
//! for those the tag scan below is a compatibility shim:
//!
//! - condition: first tag containing `"Condition"`
//! - brand: first non-condition tag that is a known brand

use crate::types::{Product, ProductAttributes};

/// Brands recognized by the tag shim.
pub const KNOWN_BRANDS: &[&str] = &[
    "Levi's",
    "Nike",
    "Adidas",
    "Carhartt",
    "Tommy Hilfiger",
    "Vintage",
];

/// Conditions offered by the listing filter.
pub const KNOWN_CONDITIONS: &[&str] = &[
    "Excellent Condition",
    "Good Condition",
    "Fair Condition",
];

const CONDITION_MARKER: &str = "Condition";

/// Brand of a product, from attributes or tags.
pub fn brand(product: &Product) -> Option<&str> {
    product
        .attributes
        .brand
        .as_deref()
        .or_else(|| brand_from_tags(&product.tags))
}

/// Condition of a product, from attributes or tags.
pub fn condition(product: &Product) -> Option<&str> {
    product
        .attributes
        .condition
        .as_deref()
        .or_else(|| condition_from_tags(&product.tags))
}

/// Attributes with the tag shim applied.
pub fn resolved(product: &Product) -> ProductAttributes {
    ProductAttributes {
        brand: brand(product).map(str::to_string),
        condition: condition(product).map(str::to_string),
    }
}

fn brand_from_tags(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .find(|tag| !tag.contains(CONDITION_MARKER) && KNOWN_BRANDS.contains(tag))
}

fn condition_from_tags(tags: &[String]) -> Option<&str> {
    tags.iter()
        .map(String::as_str)
        .find(|tag| tag.contains(CONDITION_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn tagged(tags: &[&str]) -> Product {
        Product {
            id: "p1".to_string(),
            title: "Nike Windbreaker".to_string(),
            slug: "nike-windbreaker".to_string(),
            description: None,
            price: Money::from_cents(3500),
            compare_at: None,
            options: vec![],
            variants: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            attributes: ProductAttributes::default(),
            featured: false,
            images: vec![],
            stock: Default::default(),
        }
    }

    #[test]
    fn test_tag_shim() {
        let product = tagged(&["90s", "Nike", "Good Condition", "Adidas"]);
        assert_eq!(brand(&product), Some("Nike"));
        assert_eq!(condition(&product), Some("Good Condition"));
    }

    #[test]
    fn test_unknown_tags_yield_nothing() {
        let product = tagged(&["streetwear", "y2k"]);
        assert_eq!(brand(&product), None);
        assert_eq!(condition(&product), None);
    }

    #[test]
    fn test_structured_attributes_win() {
        let mut product = tagged(&["Nike", "Fair Condition"]);
        product.attributes.brand = Some("Patagonia".to_string());

        let attrs = resolved(&product);
        assert_eq!(attrs.brand.as_deref(), Some("Patagonia"));
        assert_eq!(attrs.condition.as_deref(), Some("Fair Condition"));
    }
}
