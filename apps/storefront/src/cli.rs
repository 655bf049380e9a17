//! Command-line surface over the storefront commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Vintage Finds storefront: browse the catalog and manage the cart", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir / storefront.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog JSON file, overrides the config
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Directory for the saved cart, overrides the config
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products, optionally filtered
    #[command(alias = "ls")]
    Products {
        #[arg(long)]
        collection: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        condition: Option<String>,
        /// Only featured products
        #[arg(long)]
        featured: bool,
    },

    /// List collections
    Collections,

    /// Show a product card
    Show {
        slug: String,
        /// Option pick, e.g. --select Size=M (repeatable)
        #[arg(long = "select", value_name = "NAME=VALUE")]
        selection: Vec<String>,
    },

    /// Add one unit of a product (with its option picks) to the cart
    Add {
        slug: String,
        #[arg(long = "select", value_name = "NAME=VALUE")]
        selection: Vec<String>,
    },

    /// Set the quantity of a cart line (0 removes it)
    Update {
        product_id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(long)]
        variant: Option<String>,
    },

    /// Remove a cart line
    #[command(alias = "rm")]
    Remove {
        product_id: String,
        #[arg(long)]
        variant: Option<String>,
    },

    /// Show the cart
    Cart,

    /// Empty the cart
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_selection() {
        let cli = Cli::parse_from([
            "storefront",
            "add",
            "levis-501-original",
            "--select",
            "Size=M",
            "--select",
            "Color=Red",
        ]);
        match cli.command {
            Command::Add { slug, selection } => {
                assert_eq!(slug, "levis-501-original");
                assert_eq!(selection, vec!["Size=M", "Color=Red"]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_update_keeps_raw_quantity() {
        let cli = Cli::parse_from(["storefront", "update", "p1", "2.5", "--variant", "v1"]);
        match cli.command {
            Command::Update {
                product_id,
                quantity,
                variant,
            } => {
                assert_eq!(product_id, "p1");
                assert_eq!(quantity, "2.5");
                assert_eq!(variant.as_deref(), Some("v1"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["storefront", "cart", "--catalog", "/tmp/c.json"]);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/c.json")));
    }
}
