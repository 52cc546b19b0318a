//! # Quote Commands
//!
//! `price`, `save`, `export` and `quotes`.
//!
//! The first three build a [`QuoteDraft`] from the flags the same way, so a
//! saved or exported quote always matches what `price` showed for the same
//! arguments.

use chrono::Utc;
use purolea_core::document::{DocumentExporter, DocumentHeader, JsonExporter, QuoteDocument, TextExporter};
use purolea_core::money::{format_number, Amount};
use purolea_core::pricing::CostComponent;
use purolea_core::session::parse_quantity_lenient;
use purolea_core::{CatalogSnapshot, CoreError, CostBreakdown, CostInputs, ProductRef, Quote, QuoteDraft, Sourcing};
use purolea_db::CatalogStore;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::{resolve_product, right, to_json};
use crate::cli::{ClientArgs, ExportArgs, QuoteArgs};
use crate::config::AppConfig;
use crate::error::CliResult;

const NO_PRODUCT: &str = "No product selected";

// =============================================================================
// Draft Construction
// =============================================================================

/// Builds a draft from command line flags.
///
/// A catalog product loads its default prices first; explicit overrides
/// replace them afterwards.
pub fn build_draft(catalog: &CatalogSnapshot, args: &QuoteArgs) -> CliResult<QuoteDraft> {
    let mut draft = QuoteDraft::new();

    if let Some(key) = &args.product {
        let id = resolve_product(catalog, key)?.id.clone();
        draft.select_product(catalog, &id)?;
    } else if let Some(name) = &args.product_name {
        draft.use_external_product(name.as_str());
    }

    if let Some(raw) = &args.formula_price {
        draft.set_formula_price(Amount::parse_lenient(raw).value());
    }
    if let Some(raw) = &args.size {
        draft.set_size(Amount::parse_lenient(raw).value());
    }
    if let Some(raw) = &args.packaging_price {
        draft.set_packaging_price(Amount::parse_lenient(raw).value());
    }

    draft.set_quantity(parse_quantity_lenient(&args.quantity));
    draft.set_packaging(Sourcing::from_client_supplies(args.client_packaging));
    draft.set_labels(Sourcing::from_client_supplies(args.client_labels));

    Ok(draft)
}

fn product_label(catalog: &CatalogSnapshot, draft: &QuoteDraft) -> String {
    match &draft.product {
        Some(ProductRef::Catalog(id)) => catalog
            .product(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.clone()),
        Some(ProductRef::External(name)) => name.clone(),
        None => NO_PRODUCT.to_string(),
    }
}

// =============================================================================
// price
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceOutput {
    product: String,
    inputs: CostInputs,
    breakdown: CostBreakdown,
}

pub async fn price<S: CatalogStore>(store: &S, args: &QuoteArgs, json: bool) -> CliResult<String> {
    let catalog = store.load_catalog().await?;
    let draft = build_draft(&catalog, args)?;
    let breakdown = draft.breakdown(&catalog);
    let product = product_label(&catalog, &draft);

    debug!(
        product = %product,
        quantity = breakdown.quantity,
        total = %breakdown.total_project_cost,
        "Priced draft"
    );

    if json {
        return to_json(&PriceOutput {
            product,
            inputs: draft.inputs(),
            breakdown,
        });
    }

    Ok(render_breakdown(&product, &breakdown))
}

/// Text cost table.
///
/// ```text
/// Body Lotion, 500 units
///
/// Component           Per Unit           Total
/// Formula Cost          $16.00       $8,000.00
/// ...
/// ```
pub fn render_breakdown(product: &str, breakdown: &CostBreakdown) -> String {
    let mut lines = vec![
        format!(
            "{}, {} units",
            product,
            format_number(f64::from(breakdown.quantity), 0)
        ),
        String::new(),
        format!("{:<16}{}{}", "Component", right("Per Unit", 12), right("Total", 16)),
    ];

    for component in CostComponent::ALL {
        lines.push(format!(
            "{:<16}{}{}",
            component.label(),
            right(breakdown.per_unit(component), 12),
            right(breakdown.extended(component), 16)
        ));
    }

    lines.push("-".repeat(44));
    lines.push(format!(
        "{:<16}{}{}",
        "Total",
        right(breakdown.total_unit_cost, 12),
        right(breakdown.total_project_cost, 16)
    ));

    lines.join("\n")
}

// =============================================================================
// save
// =============================================================================

pub async fn save<S: CatalogStore>(
    store: &S,
    config: &AppConfig,
    args: &QuoteArgs,
    client: &ClientArgs,
    json: bool,
) -> CliResult<String> {
    let catalog = store.load_catalog().await?;
    let mut draft = build_draft(&catalog, args)?;
    draft.set_client(client.client_name.as_str(), client.client_email.as_str());

    let quote = store
        .create_quote(draft.confirm(&catalog, config.created_by.clone())?)
        .await?;

    if json {
        return to_json(&quote);
    }

    Ok(format!(
        "Saved quote {} for {}\n\n{}",
        quote.id,
        quote.client_name,
        render_breakdown(&product_label(&catalog, &draft), &draft.breakdown(&catalog))
    ))
}

// =============================================================================
// export
// =============================================================================

/// Renders a quote document for a selected product.
///
/// Client fields are optional here; a document without them leaves the
/// client signature line blank.
pub async fn export<S: CatalogStore>(
    store: &S,
    config: &AppConfig,
    args: &ExportArgs,
    json: bool,
) -> CliResult<String> {
    let catalog = store.load_catalog().await?;
    let mut draft = build_draft(&catalog, &args.quote)?;
    if draft.product.is_none() {
        return Err(CoreError::NoProductSelected.into());
    }

    draft.set_client(
        args.client_name.clone().unwrap_or_default(),
        args.client_email.clone().unwrap_or_default(),
    );
    draft.notes = args.notes.clone();

    let header = DocumentHeader::new(config.company_name.as_str(), Utc::now());
    let document = QuoteDocument::build(&catalog, &draft, header);

    if json {
        return Ok(JsonExporter { pretty: true }.export(&document)?);
    }

    let exporter = TextExporter::new(args.page_lines.unwrap_or(config.page_lines));
    debug!(
        title = %document.title(),
        page_lines = exporter.page_lines(),
        "Exporting document"
    );
    Ok(exporter.render(&document))
}

// =============================================================================
// quotes
// =============================================================================

/// Lists saved quotes, newest first.
pub async fn list<S: CatalogStore>(store: &S, limit: u32, json: bool) -> CliResult<String> {
    let (quotes, products) = tokio::try_join!(store.list_quotes(limit), store.list_products())?;

    if json {
        return to_json(&quotes);
    }
    if quotes.is_empty() {
        return Ok("No saved quotes".to_string());
    }

    let names: HashMap<&str, &str> = products
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let mut lines = vec![format!(
        "{:<12}{:<20}{:<20}{}{}{}",
        "Date",
        "Client",
        "Product",
        right("Qty", 8),
        right("Unit", 10),
        right("Total", 14)
    )];
    lines.extend(quotes.iter().map(|quote| quote_row(quote, &names)));

    Ok(lines.join("\n"))
}

fn quote_row(quote: &Quote, names: &HashMap<&str, &str>) -> String {
    let product = match (&quote.product_id, &quote.product_name) {
        (Some(id), _) => names.get(id.as_str()).copied().unwrap_or("(deleted)"),
        (None, Some(name)) => name.as_str(),
        (None, None) => "(deleted)",
    };

    format!(
        "{:<12}{:<20}{:<20}{}{}{}",
        quote.created_at.format("%Y-%m-%d").to_string(),
        truncate(&quote.client_name, 19),
        truncate(product, 19),
        right(format_number(f64::from(quote.quantity), 0), 8),
        right(Amount::new(quote.total_unit_cost), 10),
        right(quote.total_project_cost(), 14)
    )
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
