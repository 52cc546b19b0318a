//! # Catalog Commands
//!
//! Listing products and price bands, and adding catalog records.

use purolea_core::money::{format_number, Amount};
use purolea_core::projection::PriceBand;
use purolea_core::{Formula, LabelTier, ManufacturingTier, PackagingOption, Product};
use purolea_db::CatalogStore;
use serde::Serialize;
use tracing::info;

use super::{resolve_product, to_json};
use crate::cli::TierKind;
use crate::error::CliResult;

// =============================================================================
// products
// =============================================================================

/// A product with the defaults a new quote would load for it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow<'a> {
    id: &'a str,
    name: &'a str,
    size_oz: f64,
    formula_price_per_oz: Option<Amount>,
    packaging: Option<&'a str>,
    packaging_price: Option<Amount>,
}

pub async fn products<S: CatalogStore>(store: &S, json: bool) -> CliResult<String> {
    let catalog = store.load_catalog().await?;

    let rows: Vec<ProductRow<'_>> = catalog
        .products
        .iter()
        .map(|product| {
            let packaging = catalog.packaging_for(&product.id);
            ProductRow {
                id: &product.id,
                name: &product.name,
                size_oz: product.size_oz,
                formula_price_per_oz: catalog.formula_for(&product.id).map(Formula::unit_price),
                packaging: packaging.map(|p| p.name.as_str()),
                packaging_price: packaging.map(PackagingOption::unit_price),
            }
        })
        .collect();

    if json {
        return to_json(&rows);
    }
    if rows.is_empty() {
        return Ok("No products in catalog".to_string());
    }

    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            let formula = row
                .formula_price_per_oz
                .map(|price| format!("{}/oz", price))
                .unwrap_or_else(|| "no formula".to_string());
            let packaging = match (row.packaging, row.packaging_price) {
                (Some(name), Some(price)) => format!("{} {}", name, price),
                _ => "no packaging".to_string(),
            };
            format!(
                "{}  {:<24}{:>8} oz   {:<14}{}",
                row.id,
                row.name,
                format_number(row.size_oz, 2),
                formula,
                packaging
            )
        })
        .collect();

    Ok(lines.join("\n"))
}

// =============================================================================
// tiers
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TierBands<'a> {
    product_id: &'a str,
    product_name: &'a str,
    label_bands: Vec<PriceBand>,
    manufacturing_bands: Vec<PriceBand>,
}

/// Shows the bands that apply to one product.
///
/// Empty tier tables show the built-in fallback schedule, since that is what
/// the product would be priced at.
pub async fn tiers<S: CatalogStore>(store: &S, product: &str, json: bool) -> CliResult<String> {
    let catalog = store.load_catalog().await?;
    let product = resolve_product(&catalog, product)?;

    let bands = TierBands {
        product_id: &product.id,
        product_name: &product.name,
        label_bands: catalog.label_bands(Some(&product.id)),
        manufacturing_bands: catalog.manufacturing_bands(Some(&product.id)),
    };

    if json {
        return to_json(&bands);
    }

    let mut lines = vec![bands.product_name.to_string(), String::new()];
    lines.push("Label printing".to_string());
    lines.extend(band_lines(&bands.label_bands, "label"));
    lines.push(String::new());
    lines.push("Manufacturing".to_string());
    lines.extend(band_lines(&bands.manufacturing_bands, "unit"));

    Ok(lines.join("\n"))
}

fn band_lines(bands: &[PriceBand], per: &str) -> Vec<String> {
    if bands.is_empty() {
        return vec!["  no tiers apply".to_string()];
    }
    bands.iter().map(|band| format!("  {}", band.describe(per))).collect()
}

// =============================================================================
// add-*
// =============================================================================

pub async fn add_product<S: CatalogStore>(
    store: &S,
    name: String,
    size_oz: f64,
    json: bool,
) -> CliResult<String> {
    let product = store.create_product(Product::new(name, size_oz)).await?;
    info!(id = %product.id, name = %product.name, "Product added");

    if json {
        return to_json(&product);
    }
    Ok(format!("Added product {} ({})", product.name, product.id))
}

pub async fn add_formula<S: CatalogStore>(
    store: &S,
    product_id: Option<String>,
    price_per_oz: f64,
    notes: Option<String>,
    json: bool,
) -> CliResult<String> {
    let formula = store
        .create_formula(Formula::new(product_id, price_per_oz, notes))
        .await?;
    info!(id = %formula.id, product_id = ?formula.product_id, "Formula added");

    if json {
        return to_json(&formula);
    }
    Ok(format!(
        "Added formula {} at {}/oz",
        formula.id,
        formula.unit_price()
    ))
}

pub async fn add_packaging<S: CatalogStore>(
    store: &S,
    product_id: Option<String>,
    name: String,
    price: f64,
    supplier: Option<String>,
    json: bool,
) -> CliResult<String> {
    let option = store
        .create_packaging_option(PackagingOption::new(product_id, name, price, supplier))
        .await?;
    info!(id = %option.id, product_id = ?option.product_id, "Packaging option added");

    if json {
        return to_json(&option);
    }
    Ok(format!(
        "Added packaging {} at {} per unit",
        option.name,
        option.unit_price()
    ))
}

pub async fn add_tier<S: CatalogStore>(
    store: &S,
    kind: TierKind,
    product_id: Option<String>,
    min_quantity: u32,
    fee: f64,
    json: bool,
) -> CliResult<String> {
    let scope = if product_id.is_some() { "product" } else { "generic" };

    let (output, kind_name) = match kind {
        TierKind::Label => {
            let tier = store
                .create_label_tier(LabelTier::new(product_id, min_quantity, fee))
                .await?;
            (if json { Some(to_json(&tier)?) } else { None }, "label")
        }
        TierKind::Manufacturing => {
            let tier = store
                .create_manufacturing_tier(ManufacturingTier::new(product_id, min_quantity, fee))
                .await?;
            (if json { Some(to_json(&tier)?) } else { None }, "manufacturing")
        }
    };
    info!(kind = kind_name, scope, min_quantity, "Tier added");

    match output {
        Some(json) => Ok(json),
        None => Ok(format!(
            "Added {} {} tier: {}+ units at {}",
            scope,
            kind_name,
            format_number(f64::from(min_quantity), 0),
            Amount::new(fee)
        )),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use crate::error::ErrorCode;
    use purolea_db::MemoryStore;

    #[tokio::test]
    async fn test_products_listing() {
        let (store, id) = fixtures::store().await;
        let output = products(&store, false).await.unwrap();

        assert!(output.contains(&id));
        assert!(output.contains("Body Lotion"));
        assert!(output.contains("$2.00/oz"));
        assert!(output.contains("8oz Bottle $1.50"));
    }

    #[tokio::test]
    async fn test_products_json() {
        let (store, _) = fixtures::store().await;
        store
            .create_product(Product::new("Bare Balm", 2.0))
            .await
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&products(&store, true).await.unwrap()).unwrap();
        assert_eq!(value[0]["formulaPricePerOz"], 2.0);
        assert_eq!(value[1]["name"], "Bare Balm");
        assert!(value[1]["packaging"].is_null());
    }

    #[tokio::test]
    async fn test_products_empty() {
        let store = MemoryStore::new();
        assert_eq!(products(&store, false).await.unwrap(), "No products in catalog");
    }

    #[tokio::test]
    async fn test_tiers_with_product_override() {
        let (store, id) = fixtures::store().await;
        add_tier(&store, TierKind::Manufacturing, Some(id.clone()), 500, 5.0, false)
            .await
            .unwrap();

        let output = tiers(&store, "Body Lotion", false).await.unwrap();
        assert!(output.contains("100-499 units: $0.75 per label"));
        assert!(output.contains("500-999 units: $5.00 per unit"));
        assert!(output.contains("1,000+ units: $2.50 per unit"));
    }

    #[tokio::test]
    async fn test_tiers_fallback_on_empty_tables() {
        let store = MemoryStore::new();
        add_product(&store, "Lip Balm".to_string(), 0.15, false)
            .await
            .unwrap();

        let output = tiers(&store, "lip balm", false).await.unwrap();
        assert!(output.contains("1,000+ units: $0.50 per label"));
        assert!(output.contains("500-999 units: $3.00 per unit"));
    }

    #[tokio::test]
    async fn test_add_records() {
        let (store, id) = fixtures::store().await;

        let output = add_formula(&store, Some(id.clone()), 3.5, None, false)
            .await
            .unwrap();
        assert!(output.ends_with("at $3.50/oz"));

        let output = add_packaging(&store, Some(id), "Jar".to_string(), 0.9, None, false)
            .await
            .unwrap();
        assert_eq!(output, "Added packaging Jar at $0.90 per unit");

        let output = add_tier(&store, TierKind::Label, None, 2500, 0.4, false)
            .await
            .unwrap();
        assert_eq!(output, "Added generic label tier: 2,500+ units at $0.40");
        assert_eq!(store.list_label_tiers().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_records() {
        let store = MemoryStore::new();

        let err = add_product(&store, " ".to_string(), 8.0, false)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_tier(
            &store,
            TierKind::Label,
            Some(purolea_core::generate_id()),
            100,
            0.5,
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Unknown product reference");
    }
}
