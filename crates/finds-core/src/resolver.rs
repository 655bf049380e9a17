//! # Variant Resolver
//!
//! Maps a shopper's selection to exactly one variant, or reports `NoMatch`.
//!
//! ## Matching Rules
//! - Every option defined on the product must have a value in the selection.
//! - Every value must equal the variant's value (case-sensitive).
//! - No fallback: an incomplete selection never resolves to "the first
//!   variant". Callers disable add-to-cart instead.
//!
//! Whether the picked values are *available* is not checked here; the
//! product view only offers values that pass [`crate::availability`].

use crate::error::{CoreError, CoreResult, NoMatchReason};
use crate::selection::Selection;
use crate::types::{Product, ProductOption, Variant};

/// Resolves `selection` against the option dimensions and variants.
pub fn resolve<'a>(
    options: &[ProductOption],
    variants: &'a [Variant],
    selection: &Selection,
) -> Result<&'a Variant, NoMatchReason> {
    let missing = selection.missing(options);
    if !missing.is_empty() {
        return Err(NoMatchReason::Incomplete {
            missing: missing.into_iter().map(str::to_string).collect(),
        });
    }

    variants
        .iter()
        .find(|variant| {
            options.iter().all(|option| {
                variant.value_of(&option.name) == selection.get(&option.name)
            })
        })
        .ok_or(NoMatchReason::NoVariant)
}

/// Resolves against a product, wrapping failures as [`CoreError::NoMatch`].
///
/// ## Example
/// ```rust,ignore
/// let variant = resolve_variant(&product, &selection)?;
/// ```
pub fn resolve_variant<'a>(product: &'a Product, selection: &Selection) -> CoreResult<&'a Variant> {
    resolve(&product.options, &product.variants, selection).map_err(|reason| CoreError::NoMatch {
        product_id: product.id.clone(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Inventory;

    fn options() -> Vec<ProductOption> {
        vec![
            ProductOption::new("Size", &["S", "M"]),
            ProductOption::new("Color", &["Red", "Blue"]),
        ]
    }

    fn variants() -> Vec<Variant> {
        [("s-red", "S", "Red"), ("s-blue", "S", "Blue"), ("m-red", "M", "Red")]
            .iter()
            .map(|(id, size, color)| Variant {
                id: id.to_string(),
                options: [("Size", *size), ("Color", *color)]
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                price: None,
                compare_at: None,
                stock: Inventory::Count(1),
                image: None,
            })
            .collect()
    }

    #[test]
    fn test_complete_selection_resolves_exact_variant() {
        let (options, variants) = (options(), variants());

        for expected in &variants {
            let selection = Selection::from(expected.options.clone());
            let resolved = resolve(&options, &variants, &selection).unwrap();
            assert_eq!(resolved.id, expected.id);
        }
    }

    #[test]
    fn test_incomplete_selection_is_no_match() {
        let (options, variants) = (options(), variants());

        let err = resolve(&options, &variants, &Selection::from_pairs([("Size", "S")])).unwrap_err();
        assert_eq!(
            err,
            NoMatchReason::Incomplete {
                missing: vec!["Color".to_string()]
            }
        );

        assert!(matches!(
            resolve(&options, &variants, &Selection::new()),
            Err(NoMatchReason::Incomplete { .. })
        ));
    }

    #[test]
    fn test_unknown_combination_is_no_match() {
        let (options, variants) = (options(), variants());
        let selection = Selection::from_pairs([("Size", "M"), ("Color", "Blue")]);

        assert_eq!(
            resolve(&options, &variants, &selection).unwrap_err(),
            NoMatchReason::NoVariant
        );
    }

    #[test]
    fn test_case_sensitive_values() {
        let (options, variants) = (options(), variants());
        let selection = Selection::from_pairs([("Size", "s"), ("Color", "Red")]);

        assert_eq!(
            resolve(&options, &variants, &selection).unwrap_err(),
            NoMatchReason::NoVariant
        );
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let (options, variants) = (options(), variants());
        let selection =
            Selection::from_pairs([("Size", "M"), ("Color", "Red"), ("Fit", "Slim")]);

        assert_eq!(resolve(&options, &variants, &selection).unwrap().id, "m-red");
    }
}
