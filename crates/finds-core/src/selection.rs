//! # Selection State
//!
//! The options a shopper has picked on one product card. Partial until every
//! option has a value. Owned by the product view; never persisted except as
//! the display snapshot copied into a cart line.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{ProductOption, Variant};

/// Option name → chosen value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Selection(BTreeMap<String, String>);

impl Selection {
    pub fn new() -> Self {
        Selection(BTreeMap::new())
    }

    /// Builds a selection from `(name, value)` pairs. Later pairs win.
    pub fn from_pairs<N, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Selection(
            pairs
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }

    /// Picks a value, returning the one it replaced.
    pub fn set(&mut self, option_name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(option_name.into(), value.into())
    }

    pub fn get(&self, option_name: &str) -> Option<&str> {
        self.0.get(option_name).map(String::as_str)
    }

    pub fn remove(&mut self, option_name: &str) -> Option<String> {
        self.0.remove(option_name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Options that still have no value, in display order.
    pub fn missing<'a>(&self, options: &'a [ProductOption]) -> Vec<&'a str> {
        options
            .iter()
            .map(|o| o.name.as_str())
            .filter(|name| !self.0.contains_key(*name))
            .collect()
    }

    /// Whether every option has a value.
    pub fn is_complete(&self, options: &[ProductOption]) -> bool {
        options.iter().all(|o| self.0.contains_key(&o.name))
    }

    /// Whether `variant` agrees with every picked value, skipping `except`.
    ///
    /// A picked option the variant does not carry counts as a disagreement.
    pub fn agrees_with(&self, variant: &Variant, except: Option<&str>) -> bool {
        self.0
            .iter()
            .filter(|(name, _)| Some(name.as_str()) != except)
            .all(|(name, value)| variant.value_of(name) == Some(value.as_str()))
    }

    /// Consumes the selection into its map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for Selection {
    fn from(map: BTreeMap<String, String>) -> Self {
        Selection(map)
    }
}
