//! # Catalog State
//!
//! Serves catalog records from a JSON file exported by the remote catalog.
//! The file is read and validated once at startup; after that the catalog
//! is read-only, so no lock is needed.

use std::path::{Path, PathBuf};

use finds_core::catalog::{Catalog, CatalogProvider};
use finds_core::{Collection, CoreError, Product};
use thiserror::Error;
use tracing::info;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Read-only catalog loaded from JSON.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
}

impl CatalogState {
    /// Reads and validates the catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state = Self::from_json(&raw)?;
        info!(
            ?path,
            products = state.catalog.products.len(),
            collections = state.catalog.collections.len(),
            "Catalog loaded"
        );
        Ok(state)
    }

    /// Parses and validates catalog JSON.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(CatalogState { catalog })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl CatalogProvider for CatalogState {
    fn products(&self) -> &[Product] {
        &self.catalog.products
    }

    fn collections(&self) -> &[Collection] {
        &self.catalog.collections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../fixtures/catalog.json");

    #[test]
    fn test_fixture_loads() {
        let state = CatalogState::from_json(FIXTURE).unwrap();
        assert!(!state.products().is_empty());
        assert!(state.product_by_slug("levis-501-original").is_some());
        assert!(state.collection("denim").is_some());
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        let raw = r#"{"products": [{"id": "", "title": "x", "slug": "x", "price": 100}]}"#;
        assert!(matches!(
            CatalogState::from_json(raw),
            Err(CatalogError::Invalid(_))
        ));
        assert!(matches!(
            CatalogState::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CatalogState::load(&dir.path().join("nope.json")),
            Err(CatalogError::Io { .. })
        ));
    }
}
