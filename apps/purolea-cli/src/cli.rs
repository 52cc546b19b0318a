use clap::{Args, Parser, Subcommand, ValueEnum};
use purolea_db::DEFAULT_QUOTE_LIMIT;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "purolea", version, about = "Production quotes for private-label cosmetics")]
pub struct Cli {
    /// Database file path (overrides PUROLEA_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List catalog products with their default formula and packaging prices
    Products,

    /// Show the label and manufacturing price bands for a product
    Tiers {
        /// Catalog product id or name
        #[arg(long)]
        product: String,
    },

    /// Price a production run
    Price(QuoteArgs),

    /// Price a production run and save it as a quote
    Save {
        #[command(flatten)]
        quote: QuoteArgs,

        #[command(flatten)]
        client: ClientArgs,
    },

    /// Render a quote document
    Export(ExportArgs),

    /// List saved quotes, newest first
    Quotes {
        #[arg(long, default_value_t = DEFAULT_QUOTE_LIMIT)]
        limit: u32,
    },

    /// Add a product
    AddProduct {
        #[arg(long)]
        name: String,

        /// Fill size in ounces
        #[arg(long)]
        size: f64,
    },

    /// Add a formula price
    AddFormula {
        /// Product id (omit for an unlinked formula)
        #[arg(long)]
        product: Option<String>,

        #[arg(long)]
        price_per_oz: f64,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Add a packaging option
    AddPackaging {
        #[arg(long)]
        product: Option<String>,

        #[arg(long)]
        name: String,

        #[arg(long)]
        price: f64,

        #[arg(long)]
        supplier: Option<String>,
    },

    /// Add a label or manufacturing price tier
    AddTier {
        #[arg(long, value_enum)]
        kind: TierKind,

        /// Product id (omit for a tier that applies to every product)
        #[arg(long)]
        product: Option<String>,

        #[arg(long)]
        min_quantity: u32,

        /// Per-unit fee
        #[arg(long)]
        fee: f64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    Label,
    Manufacturing,
}

/// Inputs shared by `price`, `save` and `export`.
///
/// Numeric values are read leniently: anything unparseable counts as 0.
#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// Catalog product id or name
    #[arg(long, conflicts_with = "product_name")]
    pub product: Option<String>,

    /// Name of a product that is not in the catalog
    #[arg(long)]
    pub product_name: Option<String>,

    #[arg(short, long, default_value = "100")]
    pub quantity: String,

    /// Client provides their own packaging
    #[arg(long)]
    pub client_packaging: bool,

    /// Client provides their own labels
    #[arg(long)]
    pub client_labels: bool,

    /// Override the formula price per ounce
    #[arg(long)]
    pub formula_price: Option<String>,

    /// Override the fill size in ounces
    #[arg(long)]
    pub size: Option<String>,

    /// Override the packaging price per unit
    #[arg(long)]
    pub packaging_price: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub quote: QuoteArgs,

    #[arg(long)]
    pub client_name: Option<String>,

    #[arg(long)]
    pub client_email: Option<String>,

    /// Free-form notes printed on the document
    #[arg(long)]
    pub notes: Option<String>,

    /// Lines per page (overrides PUROLEA_PAGE_LINES)
    #[arg(long)]
    pub page_lines: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    #[arg(long)]
    pub client_name: String,

    #[arg(long)]
    pub client_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_defaults() {
        let cli = Cli::try_parse_from(["purolea", "price", "--product", "abc"]).unwrap();
        assert!(!cli.json);
        match cli.command {
            Commands::Price(args) => {
                assert_eq!(args.product.as_deref(), Some("abc"));
                assert_eq!(args.quantity, "100");
                assert!(!args.client_packaging);
                assert!(!args.client_labels);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "purolea", "quotes", "--limit", "5", "--json", "--db", "/tmp/x.db",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert!(matches!(cli.command, Commands::Quotes { limit: 5 }));
    }

    #[test]
    fn test_product_flags_conflict() {
        assert!(Cli::try_parse_from([
            "purolea",
            "price",
            "--product",
            "abc",
            "--product-name",
            "Serum",
        ])
        .is_err());
    }

    #[test]
    fn test_save_requires_client() {
        assert!(Cli::try_parse_from(["purolea", "save", "--product", "abc"]).is_err());
    }

    #[test]
    fn test_add_tier_kind() {
        let cli = Cli::try_parse_from([
            "purolea",
            "add-tier",
            "--kind",
            "manufacturing",
            "--min-quantity",
            "500",
            "--fee",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::AddTier { kind, product, min_quantity, fee } => {
                assert_eq!(kind, TierKind::Manufacturing);
                assert_eq!(product, None);
                assert_eq!(min_quantity, 500);
                assert_eq!(fee, 3.0);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
