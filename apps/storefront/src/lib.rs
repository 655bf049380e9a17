//! # Vintage Finds Storefront Library
//!
//! Wires config, catalog and cart together and exposes the command
//! functions a renderer (or the `storefront` CLI) calls.
//!
//! ## Module Organization
//! ```text
//! finds_storefront/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions for the binary
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── storefront.toml + FINDS_* overrides
//! │   ├── catalog.rs  ◄─── JSON catalog provider
//! │   └── cart.rs     ◄─── Cart store + drawer bridge
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Listing / product card commands
//! │   └── cart.rs     ◄─── Cart manipulation commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use finds_core::catalog::ProductFilter;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use error::ApiError;
use state::{CartState, CatalogState, StorefrontConfig};

/// Everything a command may need, built once at startup.
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: CatalogState,
    cart: CartState,
}

impl Storefront {
    /// Loads the catalog and opens the persisted cart.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Config ──────► storefront.toml, FINDS_* env, CLI flags              │
    /// │  2. Catalog ─────► read + validate catalog.json                         │
    /// │  3. Cart ────────► FileStorage in the storage dir, hydrate snapshot     │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn open(config: StorefrontConfig) -> Result<Self, ApiError> {
        let catalog = CatalogState::load(&config.catalog_path()?)?;
        let cart = CartState::from_config(&config)?;
        Ok(Storefront {
            config,
            catalog,
            cart,
        })
    }

    /// Assembles a storefront from already-built parts.
    pub fn from_parts(config: StorefrontConfig, catalog: CatalogState, cart: CartState) -> Self {
        Storefront {
            config,
            catalog,
            cart,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    /// Runs one command and returns its JSON response.
    pub fn execute(&self, command: Command) -> Result<serde_json::Value, ApiError> {
        use commands::{cart, product};

        match command {
            Command::Products {
                collection,
                brand,
                condition,
                featured,
            } => {
                let filter = ProductFilter {
                    collection_id: collection,
                    brand,
                    condition,
                    featured_only: featured,
                };
                to_json(product::list_products(&self.catalog, &filter))
            }
            Command::Collections => to_json(product::list_collections(&self.catalog)),
            Command::Show { slug, selection } => {
                to_json(product::get_product(&self.catalog, &slug, &selection)?)
            }
            Command::Add { slug, selection } => self.cart_json(cart::add_to_cart(
                &self.catalog,
                &self.cart,
                &slug,
                &selection,
            )?),
            Command::Update {
                product_id,
                quantity,
                variant,
            } => self.cart_json(cart::update_cart_item(
                &self.cart,
                &product_id,
                variant.as_deref(),
                &quantity,
            )?),
            Command::Remove {
                product_id,
                variant,
            } => self.cart_json(cart::remove_from_cart(
                &self.cart,
                &product_id,
                variant.as_deref(),
            )),
            Command::Cart => self.cart_json(cart::get_cart(&self.cart)),
            Command::Clear => self.cart_json(cart::clear_cart(&self.cart)),
        }
    }

    /// Cart responses carry totals formatted in the store currency.
    fn cart_json(
        &self,
        response: commands::cart::CartResponse,
    ) -> Result<serde_json::Value, ApiError> {
        to_json(response.formatted(&self.config))
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

/// Resolves config for a CLI invocation.
///
/// An explicit `--config` must load; otherwise a broken default file falls
/// back to defaults with a warning. Path flags override both.
pub fn resolve_config(cli: &Cli) -> Result<StorefrontConfig, ApiError> {
    let mut config = match &cli.config {
        Some(path) => StorefrontConfig::load(Some(path.clone()))?,
        None => StorefrontConfig::load_or_default(None),
    };

    if let Some(path) = &cli.catalog {
        config.catalog.path = Some(path.clone());
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage.dir = Some(dir.clone());
    }
    Ok(config)
}

/// Runs the CLI.
pub fn run(cli: Cli) -> Result<serde_json::Value, ApiError> {
    let config = resolve_config(&cli)?;
    info!(store = %config.store.name, "Starting Vintage Finds storefront");

    let storefront = Storefront::open(config)?;
    storefront.execute(cli.command)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=finds_cart=trace` - Trace the cart store only
/// - Default: INFO, DEBUG for the finds crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,finds=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn storefront(dir: &std::path::Path) -> Storefront {
        let catalog_path = dir.join("catalog.json");
        std::fs::write(&catalog_path, include_str!("../fixtures/catalog.json")).unwrap();

        let mut config = StorefrontConfig::default();
        config.catalog.path = Some(catalog_path);
        config.storage.dir = Some(dir.join("data"));
        Storefront::open(config).unwrap()
    }

    fn cli(args: &[&str]) -> Command {
        let mut argv = vec!["storefront"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).command
    }

    #[test]
    fn test_cart_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        {
            let app = storefront(dir.path());
            app.execute(cli(&["add", "nike-windbreaker"])).unwrap();
            app.execute(cli(&["add", "nike-windbreaker"])).unwrap();
        }

        let app = storefront(dir.path());
        let cart = app.execute(cli(&["cart"])).unwrap();
        assert_eq!(cart["totals"]["totalItems"], 2);
        assert_eq!(cart["totals"]["totalPrice"], 9000);
        assert_eq!(cart["badge"], "2");
        assert_eq!(cart["display"]["totalPrice"], "$90.00");
    }

    #[test]
    fn test_products_and_show() {
        let dir = tempfile::tempdir().unwrap();
        let app = storefront(dir.path());

        let listing = app.execute(cli(&["products", "--brand", "Nike"])).unwrap();
        assert_eq!(listing["count"], 1);

        let card = app
            .execute(cli(&["show", "levis-501-original", "--select", "Size=S"]))
            .unwrap();
        assert_eq!(card["missingOptions"], serde_json::json!(["Color"]));
        assert_eq!(card["canAddToCart"], false);
    }

    #[test]
    fn test_update_negative_quantity() {
        let dir = tempfile::tempdir().unwrap();
        let app = storefront(dir.path());
        app.execute(cli(&["add", "nike-windbreaker"])).unwrap();

        let err = app
            .execute(cli(&["update", "prod-nike-windbreaker", "-1"]))
            .unwrap_err();
        assert_eq!(err.code, error::ErrorCode::InvalidQuantity);
    }

    #[test]
    fn test_missing_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::default();
        config.catalog.path = Some(dir.path().join("missing.json"));
        config.storage.dir = Some(dir.path().to_path_buf());

        let err = Storefront::open(config).unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigError);
    }
}
