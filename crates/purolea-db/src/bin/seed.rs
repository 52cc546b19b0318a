//! # Seed Data Generator
//!
//! Populates the database with a development catalog.
//!
//! ## Usage
//! ```bash
//! # Seed ./purolea_dev.db
//! cargo run -p purolea-db --bin seed
//!
//! # Specify database path
//! cargo run -p purolea-db --bin seed -- --db ./data/purolea.db
//! ```
//!
//! ## Generated Data
//! - Products across skin, hair and body lines, each with a formula and a
//!   packaging option
//! - Generic label tiers (0.75 / 0.65 / 0.50) and manufacturing tiers
//!   (4.00 / 3.00 / 2.50) at 100 / 500 / 1,000 units
//! - Product-specific manufacturing tiers for the serums, which cost more
//!   to fill

use std::env;

use purolea_core::{Formula, LabelTier, ManufacturingTier, PackagingOption, Product};
use purolea_db::{Database, DbConfig, DbResult};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (name, size oz, formula $/oz, formula notes, packaging name, packaging $, supplier)
const PRODUCTS: &[(&str, f64, f64, &str, &str, f64, &str)] = &[
    ("Body Lotion", 8.0, 2.00, "Shea and cocoa butter base", "8oz Pump Bottle", 1.50, "Berlin Packaging"),
    ("Hand Cream", 3.0, 2.40, "Urea 5%", "3oz Tube", 0.85, "Tubex"),
    ("Vitamin C Serum", 1.0, 6.50, "15% L-ascorbic acid", "1oz Dropper Bottle", 1.10, "SKS Bottle"),
    ("Hyaluronic Serum", 1.0, 5.75, "Multi-weight HA", "1oz Dropper Bottle", 1.10, "SKS Bottle"),
    ("Daily Moisturizer", 1.7, 3.20, "SPF-free day cream", "50ml Airless Jar", 1.95, "Berlin Packaging"),
    ("Argan Shampoo", 12.0, 0.85, "Sulfate-free", "12oz Flip-Top Bottle", 0.70, "Tubex"),
    ("Argan Conditioner", 12.0, 0.95, "Silicone-free", "12oz Flip-Top Bottle", 0.70, "Tubex"),
    ("Sugar Body Scrub", 10.0, 1.40, "Cane sugar and jojoba", "10oz PET Jar", 0.95, "SKS Bottle"),
    ("Lip Balm", 0.15, 12.00, "Beeswax and peppermint", "0.15oz Twist Tube", 0.30, "Tubex"),
    ("Facial Cleanser", 6.0, 1.60, "Gentle foaming gel", "6oz Foamer Bottle", 1.25, "Berlin Packaging"),
];

/// (min quantity, label $/unit, manufacturing $/unit)
const GENERIC_TIERS: &[(u32, f64, f64)] = &[(100, 0.75, 4.00), (500, 0.65, 3.00), (1000, 0.50, 2.50)];

/// Serum manufacturing tiers (min quantity, $/unit).
const SERUM_TIERS: &[(u32, f64)] = &[(100, 4.50), (500, 3.60), (1000, 3.00)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./purolea_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Purolea Quote Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./purolea_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        warn!(
            products = existing,
            "Database already has products, skipping seed (delete the file to regenerate)"
        );
        return Ok(());
    }

    let start = std::time::Instant::now();
    let products = seed_products(&db).await?;
    let tiers = seed_tiers(&db, &products).await?;

    info!(
        products = products.len(),
        tiers,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    Ok(())
}

/// Inserts every product with its formula and packaging option.
async fn seed_products(db: &Database) -> DbResult<Vec<Product>> {
    let mut created = Vec::with_capacity(PRODUCTS.len());

    for &(name, size, price_per_oz, notes, packaging, packaging_price, supplier) in PRODUCTS {
        let product = db.products().insert(&Product::new(name, size)).await?;

        db.formulas()
            .insert(&Formula::new(
                Some(product.id.clone()),
                price_per_oz,
                Some(notes.to_string()),
            ))
            .await?;

        db.packaging()
            .insert(&PackagingOption::new(
                Some(product.id.clone()),
                packaging,
                packaging_price,
                Some(supplier.to_string()),
            ))
            .await?;

        created.push(product);
    }

    Ok(created)
}

/// Inserts the generic tier schedules and the serum overrides.
///
/// Returns the number of tier rows written.
async fn seed_tiers(db: &Database, products: &[Product]) -> DbResult<usize> {
    let mut written = 0;

    for &(min_quantity, label_cost, fee) in GENERIC_TIERS {
        db.tiers()
            .insert_label_tier(&LabelTier::new(None, min_quantity, label_cost))
            .await?;
        db.tiers()
            .insert_manufacturing_tier(&ManufacturingTier::new(None, min_quantity, fee))
            .await?;
        written += 2;
    }

    for serum in products.iter().filter(|p| p.name.ends_with("Serum")) {
        for &(min_quantity, fee) in SERUM_TIERS {
            db.tiers()
                .insert_manufacturing_tier(&ManufacturingTier::new(
                    Some(serum.id.clone()),
                    min_quantity,
                    fee,
                ))
                .await?;
            written += 1;
        }
    }

    Ok(written)
}
