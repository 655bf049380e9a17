//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FINDS_CATALOG_PATH=/srv/finds/catalog.json                         │
//! │     FINDS_MAX_QUANTITY=10                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/vintage-finds/storefront.toml (Linux)                    │
//! │     ~/Library/Application Support/com.vintage-finds.storefront/...     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [store]
//! name = "Vintage Finds"
//! currency_code = "USD"
//! currency_symbol = "$"
//! currency_decimals = 2
//!
//! [catalog]
//! path = "/srv/finds/catalog.json"
//!
//! [storage]
//! dir = "/var/lib/vintage-finds"
//!
//! [cart]
//! max_quantity = 999
//! max_lines = 100
//! storage_key = "vintage-finds:cart"
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use finds_cart::CartConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine a {0} directory for this platform")]
    NoPlatformDir(&'static str),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Shop identity and money display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency code (ISO 4217)
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of decimal places for currency
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_store_name() -> String {
    "Vintage Finds".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

/// Where the catalog JSON lives. Defaults to `catalog.json` in the data dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Where cart snapshots are written. Defaults to the platform data dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub cart: CartConfig,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }
        if self.store.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "store.currency_decimals must be 0-4, got {}",
                self.store.currency_decimals
            )));
        }
        if let Some(problem) = self.cart.problem() {
            return Err(ConfigError::Invalid(problem));
        }
        Ok(())
    }

    /// Applies `FINDS_*` overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("FINDS_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(path) = lookup("FINDS_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("FINDS_STORAGE_DIR") {
            debug!(dir = %dir, "Overriding storage dir from environment");
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup("FINDS_MAX_QUANTITY") {
            match raw.parse::<i64>() {
                Ok(max) => self.cart.max_quantity = max,
                Err(_) => warn!(value = %raw, "Ignoring non-numeric FINDS_MAX_QUANTITY"),
            }
        }

        if let Some(raw) = lookup("FINDS_MAX_LINES") {
            match raw.parse::<usize>() {
                Ok(max) => self.cart.max_lines = max,
                Err(_) => warn!(value = %raw, "Ignoring non-numeric FINDS_MAX_LINES"),
            }
        }
    }

    /// Catalog file, falling back to `<data dir>/catalog.json`.
    pub fn catalog_path(&self) -> ConfigResult<PathBuf> {
        match &self.catalog.path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("catalog.json")),
        }
    }

    /// Cart storage directory, falling back to the platform data dir.
    pub fn storage_dir(&self) -> ConfigResult<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::data_dir(),
        }
    }

    /// Formats minor units for display.
    ///
    /// ## Example
    /// ```rust
    /// use finds_storefront::state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(8000), "$80.00");
    /// ```
    pub fn format_currency(&self, minor_units: i64) -> String {
        let decimals = self.store.currency_decimals;
        let divisor = 10_i64.pow(decimals as u32);
        let whole = minor_units / divisor;
        let frac = (minor_units % divisor).abs();

        format!(
            "{}{}{}",
            if minor_units < 0 { "-" } else { "" },
            self.store.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole.abs(), frac, width = decimals as usize)
            } else {
                whole.abs().to_string()
            }
        )
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "vintage-finds", "storefront")
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    fn data_dir() -> ConfigResult<PathBuf> {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoPlatformDir("data"))
    }

    /// Loads a config file without environment overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: StorefrontConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(8000), "$80.00");
        assert_eq!(config.format_currency(1), "$0.01");
        assert_eq!(config.format_currency(-1234), "-$12.34");
    }

    #[test]
    fn test_format_currency_zero_decimals() {
        let mut config = StorefrontConfig::default();
        config.store.currency_symbol = "¥".to_string();
        config.store.currency_decimals = 0;
        assert_eq!(config.format_currency(1500), "¥1500");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            "[store]\nname = \"Finds East\"\n\n[cart]\nmax_quantity = 5\n",
        )
        .unwrap();

        let config = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(config.store.name, "Finds East");
        assert_eq!(config.store.currency_symbol, "$");
        assert_eq!(config.cart.max_quantity, 5);
        assert_eq!(config.cart.max_lines, 100);
        assert_eq!(config.cart.storage_key, "vintage-finds:cart");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[cart]\nmax_lines = 0\n").unwrap();
        assert!(matches!(
            StorefrontConfig::from_file(&path),
            Err(ConfigError::Invalid(_))
        ));

        std::fs::write(&path, "[cart\n").unwrap();
        assert!(matches!(
            StorefrontConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("FINDS_CATALOG_PATH", "/tmp/catalog.json"),
            ("FINDS_MAX_QUANTITY", "12"),
            ("FINDS_MAX_LINES", "lots"),
        ]
        .into_iter()
        .collect();

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog_path().unwrap(), PathBuf::from("/tmp/catalog.json"));
        assert_eq!(config.cart.max_quantity, 12);
        assert_eq!(config.cart.max_lines, 100);
    }
}
