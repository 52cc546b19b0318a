//! # Commands Module
//!
//! One function per subcommand. Every function takes the store it works
//! against and returns the text to print.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  main.rs                                                                │
//! │    │  execute(&db, &config, cli.command, cli.json)                      │
//! │    ▼                                                                    │
//! │  commands::execute ──► catalog::*   products, tiers, add-*              │
//! │                    └─► quote::*     price, save, export, quotes         │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    store.load_catalog() → purolea-core engine           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    CliResult<String> (text table or JSON)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are generic over [`CatalogStore`], so the tests below run every
//! one of them against a [`purolea_db::MemoryStore`].

pub mod catalog;
pub mod quote;

use purolea_core::{CatalogSnapshot, CoreError, Product};
use purolea_db::CatalogStore;
use serde::Serialize;

use crate::cli::Commands;
use crate::config::AppConfig;
use crate::error::CliResult;

/// Runs one subcommand.
pub async fn execute<S: CatalogStore>(
    store: &S,
    config: &AppConfig,
    command: Commands,
    json: bool,
) -> CliResult<String> {
    match command {
        Commands::Products => catalog::products(store, json).await,
        Commands::Tiers { product } => catalog::tiers(store, &product, json).await,
        Commands::Price(args) => quote::price(store, &args, json).await,
        Commands::Save { quote, client } => quote::save(store, config, &quote, &client, json).await,
        Commands::Export(args) => quote::export(store, config, &args, json).await,
        Commands::Quotes { limit } => quote::list(store, limit, json).await,
        Commands::AddProduct { name, size } => catalog::add_product(store, name, size, json).await,
        Commands::AddFormula {
            product,
            price_per_oz,
            notes,
        } => catalog::add_formula(store, product, price_per_oz, notes, json).await,
        Commands::AddPackaging {
            product,
            name,
            price,
            supplier,
        } => catalog::add_packaging(store, product, name, price, supplier, json).await,
        Commands::AddTier {
            kind,
            product,
            min_quantity,
            fee,
        } => catalog::add_tier(store, kind, product, min_quantity, fee, json).await,
    }
}

/// Finds a product by id, then by case-insensitive name.
pub(crate) fn resolve_product<'a>(catalog: &'a CatalogSnapshot, key: &str) -> CliResult<&'a Product> {
    catalog
        .product(key)
        .or_else(|| catalog.product_by_name(key))
        .ok_or_else(|| CoreError::ProductNotFound(key.to_string()).into())
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Right-aligns a displayable value in `width` columns.
pub(crate) fn right(value: impl ToString, width: usize) -> String {
    format!("{:>width$}", value.to_string(), width = width)
}

// =============================================================================
// Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;

    use purolea_core::{Formula, LabelTier, ManufacturingTier, PackagingOption, Product};
    use purolea_db::{CatalogStore, MemoryStore};

    use crate::config::AppConfig;

    pub fn config() -> AppConfig {
        AppConfig {
            db_path: PathBuf::from(":memory:"),
            created_by: Some("ops@purolea.com".to_string()),
            company_name: "Purolea".to_string(),
            page_lines: 54,
        }
    }

    /// Store with one 8 oz lotion at $2.00/oz in a $1.50 bottle, and the
    /// standard generic tiers. Returns the lotion's id.
    pub async fn store() -> (MemoryStore, String) {
        let store = MemoryStore::new();
        let lotion = store
            .create_product(Product::new("Body Lotion", 8.0))
            .await
            .unwrap();
        store
            .create_formula(Formula::new(Some(lotion.id.clone()), 2.0, None))
            .await
            .unwrap();
        store
            .create_packaging_option(PackagingOption::new(
                Some(lotion.id.clone()),
                "8oz Bottle",
                1.5,
                None,
            ))
            .await
            .unwrap();
        for (min, label, fee) in [(100, 0.75, 4.0), (500, 0.65, 3.0), (1000, 0.50, 2.5)] {
            store
                .create_label_tier(LabelTier::new(None, min, label))
                .await
                .unwrap();
            store
                .create_manufacturing_tier(ManufacturingTier::new(None, min, fee))
                .await
                .unwrap();
        }
        (store, lotion.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_dispatches_parsed_command() {
        let (store, _) = fixtures::store().await;
        let cli = Cli::try_parse_from([
            "purolea",
            "price",
            "--product",
            "body lotion",
            "--quantity",
            "500",
        ])
        .unwrap();

        let output = execute(&store, &fixtures::config(), cli.command, cli.json)
            .await
            .unwrap();
        assert!(output.contains("$10,575.00"));
    }

    #[tokio::test]
    async fn test_resolve_product() {
        let (store, id) = fixtures::store().await;
        let catalog = store.load_catalog().await.unwrap();

        assert_eq!(resolve_product(&catalog, &id).unwrap().name, "Body Lotion");
        assert_eq!(resolve_product(&catalog, "BODY LOTION").unwrap().id, id);

        let err = resolve_product(&catalog, "Face Mist").unwrap_err();
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: Face Mist");
    }
}
