//! # Quote Documents
//!
//! The printable form of a quote and the exporters that lay it out.
//!
//! ## Document Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PUROLEA PRODUCTION QUOTE                                   (cover)     │
//! │  Body Lotion · Generated on 2026-10-16 · Prepared for Acme              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Product Specifications       formula, size, quantity, sourcing         │
//! │  Cost Breakdown (500 units)   per unit / total for 4 components         │
//! │  Reference Pricing            engine re-run at 100 / 500 / 1000         │
//! │  Tier Schedule                label + manufacturing bands               │
//! │  Notes                        (only when present)                       │
//! │  Terms                        fixed text                                │
//! │  Signature                    authorized / accepted lines               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                      Page 1 of 2        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every number in a [`QuoteDocument`] comes from the pricing engine. The
//! exporters only arrange it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::catalog::CatalogSnapshot;
use crate::money::{format_number, Amount};
use crate::pricing::{CostBreakdown, CostComponent};
use crate::projection::PriceBand;
use crate::session::QuoteDraft;
use crate::types::ProductRef;
use crate::REFERENCE_QUANTITIES;

/// Terms printed on every quote.
pub const TERMS: [&str; 2] = [
    "Lead time: 3–4 weeks from order confirmation",
    "Quote valid for 30 days",
];

/// Shown when a draft has no product at all.
const UNNAMED_PRODUCT: &str = "Custom Product";

// =============================================================================
// Document Model
// =============================================================================

/// Who issues the document and when.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentHeader {
    pub company_name: String,
    pub generated_at: DateTime<Utc>,
}

impl DocumentHeader {
    pub fn new(company_name: impl Into<String>, generated_at: DateTime<Utc>) -> Self {
        DocumentHeader {
            company_name: company_name.into(),
            generated_at,
        }
    }
}

/// Inputs as quoted. `None` sourcing prices mean the client provides them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSpecs {
    pub product_name: String,
    pub formula_price_per_oz: Amount,
    pub size_oz: f64,
    pub quantity: u32,
    pub packaging_price: Option<Amount>,
    pub label_price: Option<Amount>,
}

/// Signature lines at the end of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureBlock {
    pub company_name: String,
    pub client_name: Option<String>,
}

/// A quote laid out for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDocument {
    pub header: DocumentHeader,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub specs: ProductSpecs,
    pub breakdown: CostBreakdown,
    pub reference_pricing: Vec<CostBreakdown>,
    pub label_bands: Vec<PriceBand>,
    pub manufacturing_bands: Vec<PriceBand>,
    pub notes: Option<String>,
    pub terms: Vec<String>,
    pub signature: SignatureBlock,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl QuoteDocument {
    /// Builds a document for a draft against a catalog snapshot.
    ///
    /// The reference table prices the draft again at each of
    /// [`REFERENCE_QUANTITIES`], keeping all other inputs.
    pub fn build(catalog: &CatalogSnapshot, draft: &QuoteDraft, header: DocumentHeader) -> Self {
        let product_name = match &draft.product {
            Some(ProductRef::Catalog(id)) => catalog
                .product(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNNAMED_PRODUCT.to_string()),
            Some(ProductRef::External(name)) => {
                non_blank(name).unwrap_or_else(|| UNNAMED_PRODUCT.to_string())
            }
            None => UNNAMED_PRODUCT.to_string(),
        };

        let breakdown = draft.breakdown(catalog);
        let reference_pricing = REFERENCE_QUANTITIES
            .iter()
            .map(|&quantity| draft.breakdown_at(catalog, quantity))
            .collect();

        let specs = ProductSpecs {
            product_name,
            formula_price_per_oz: draft.formula_price_per_oz,
            size_oz: draft.size_oz.value(),
            quantity: draft.quantity,
            packaging_price: (!draft.packaging.is_client_supplied())
                .then_some(breakdown.packaging_cost_per_unit),
            label_price: (!draft.labels.is_client_supplied())
                .then_some(breakdown.label_cost_per_unit),
        };

        let client_name = non_blank(&draft.client_name);

        QuoteDocument {
            signature: SignatureBlock {
                company_name: header.company_name.clone(),
                client_name: client_name.clone(),
            },
            header,
            client_name,
            client_email: non_blank(&draft.client_email),
            specs,
            breakdown,
            reference_pricing,
            label_bands: catalog.label_bands(draft.product_id()),
            manufacturing_bands: catalog.manufacturing_bands(draft.product_id()),
            notes: draft.notes.as_deref().and_then(non_blank),
            terms: TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Document title, e.g. "Purolea Production Quote".
    pub fn title(&self) -> String {
        format!("{} Production Quote", self.header.company_name)
    }
}

// =============================================================================
// Exporters
// =============================================================================

/// Renders a [`QuoteDocument`] into some output format.
pub trait DocumentExporter {
    type Output;

    fn export(&self, document: &QuoteDocument) -> Self::Output;
}

/// Exports the document model as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter {
    pub pretty: bool,
}

impl DocumentExporter for JsonExporter {
    type Output = serde_json::Result<String>;

    fn export(&self, document: &QuoteDocument) -> Self::Output {
        if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
    }
}

/// One page of plain-text output.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub total: usize,
    pub lines: Vec<String>,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        write!(f, "{:>72}", format!("Page {} of {}", self.number, self.total))
    }
}

/// Paginated plain-text exporter.
///
/// ## Pagination
/// ```text
///   page_lines = body + 2 footer lines (blank + "Page n of m")
///
///   A section that fits on a page is never split across two; it moves to
///   the next page instead. Longer sections flow over as many pages as
///   they need.
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextExporter {
    page_lines: usize,
}

impl Default for TextExporter {
    fn default() -> Self {
        TextExporter {
            page_lines: Self::DEFAULT_PAGE_LINES,
        }
    }
}

impl TextExporter {
    /// Lines per page on US Letter at 12pt.
    pub const DEFAULT_PAGE_LINES: usize = 54;

    /// Smallest page that still fits the cost table.
    pub const MIN_PAGE_LINES: usize = 12;

    const FOOTER_LINES: usize = 2;

    /// Creates an exporter; sizes below [`Self::MIN_PAGE_LINES`] are raised to it.
    pub fn new(page_lines: usize) -> Self {
        TextExporter {
            page_lines: page_lines.max(Self::MIN_PAGE_LINES),
        }
    }

    pub fn page_lines(&self) -> usize {
        self.page_lines
    }

    fn body_lines(&self) -> usize {
        self.page_lines - Self::FOOTER_LINES
    }

    /// Renders all pages separated by form feeds.
    pub fn render(&self, document: &QuoteDocument) -> String {
        self.export(document)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\x0c\n")
    }

    fn paginate(&self, sections: Vec<Vec<String>>) -> Vec<Vec<String>> {
        let capacity = self.body_lines();
        let mut pages = Vec::new();
        let mut current: Vec<String> = Vec::new();

        for section in sections {
            let separator = usize::from(!current.is_empty());
            let fits_here = current.len() + separator + section.len() <= capacity;
            let page_full = current.len() >= capacity;
            if !current.is_empty() && (page_full || (!fits_here && section.len() <= capacity)) {
                pages.push(std::mem::take(&mut current));
            }

            if !current.is_empty() {
                current.push(String::new());
            }
            for line in section {
                if current.len() >= capacity {
                    pages.push(std::mem::take(&mut current));
                }
                current.push(line);
            }
        }

        if !current.is_empty() || pages.is_empty() {
            pages.push(current);
        }
        pages
    }
}

impl DocumentExporter for TextExporter {
    type Output = Vec<Page>;

    fn export(&self, document: &QuoteDocument) -> Vec<Page> {
        let pages = self.paginate(text_sections(document));
        let total = pages.len();

        pages
            .into_iter()
            .enumerate()
            .map(|(i, lines)| Page {
                number: i + 1,
                total,
                lines,
            })
            .collect()
    }
}

// =============================================================================
// Text Layout
// =============================================================================

fn spec_line(label: &str, value: impl fmt::Display) -> String {
    format!("  {:<22}{}", format!("{}:", label), value)
}

fn sourcing_text(price: Option<Amount>) -> String {
    match price {
        Some(price) => format!("{} per unit", price),
        None => "Client Provided".to_string(),
    }
}

fn cost_row(label: &str, per_unit: Amount, total: Amount) -> String {
    format!("  {:<20}{:>14}{:>18}", label, per_unit.to_string(), total.to_string())
}

fn text_sections(doc: &QuoteDocument) -> Vec<Vec<String>> {
    let mut sections = Vec::new();

    let mut cover = vec![
        doc.title().to_uppercase(),
        doc.specs.product_name.clone(),
        format!("Generated on {}", doc.header.generated_at.format("%Y-%m-%d")),
    ];
    match (&doc.client_name, &doc.client_email) {
        (Some(name), Some(email)) => cover.push(format!("Prepared for: {} <{}>", name, email)),
        (Some(name), None) => cover.push(format!("Prepared for: {}", name)),
        (None, Some(email)) => cover.push(format!("Prepared for: {}", email)),
        (None, None) => {}
    }
    sections.push(cover);

    let specs = &doc.specs;
    sections.push(vec![
        "Product Specifications".to_string(),
        spec_line("Product Name", &specs.product_name),
        spec_line("Formula Cost", format!("{} per oz", specs.formula_price_per_oz)),
        spec_line("Product Size", format!("{} oz", specs.size_oz)),
        spec_line(
            "Production Quantity",
            format!("{} units", format_number(f64::from(specs.quantity), 0)),
        ),
        spec_line("Packaging", sourcing_text(specs.packaging_price)),
        spec_line("Labels", sourcing_text(specs.label_price)),
    ]);

    let breakdown = &doc.breakdown;
    let mut costs = vec![
        format!("Cost Breakdown ({} units)", format_number(f64::from(breakdown.quantity), 0)),
        format!("  {:<20}{:>14}{:>18}", "Cost Component", "Per Unit", "Total"),
    ];
    for component in CostComponent::ALL {
        costs.push(cost_row(
            component.label(),
            breakdown.per_unit(component),
            breakdown.extended(component),
        ));
    }
    costs.push(cost_row("Total", breakdown.total_unit_cost, breakdown.total_project_cost));
    sections.push(costs);

    let mut reference = vec![
        "Reference Pricing".to_string(),
        format!("  {:<20}{:>14}{:>18}", "Quantity", "Per Unit", "Total"),
    ];
    for row in &doc.reference_pricing {
        reference.push(cost_row(
            &format!("{} units", format_number(f64::from(row.quantity), 0)),
            row.total_unit_cost,
            row.total_project_cost,
        ));
    }
    sections.push(reference);

    if !doc.label_bands.is_empty() || !doc.manufacturing_bands.is_empty() {
        let mut tiers = vec!["Tier Schedule".to_string()];
        if !doc.label_bands.is_empty() {
            tiers.push("  Labels".to_string());
            tiers.extend(doc.label_bands.iter().map(|b| format!("    {}", b.describe("label"))));
        }
        if !doc.manufacturing_bands.is_empty() {
            tiers.push("  Manufacturing".to_string());
            tiers.extend(doc.manufacturing_bands.iter().map(|b| format!("    {}", b.describe("unit"))));
        }
        sections.push(tiers);
    }

    if let Some(notes) = &doc.notes {
        let mut section = vec!["Notes".to_string()];
        section.extend(notes.lines().map(|line| format!("  {}", line)));
        sections.push(section);
    }

    let mut terms = vec!["Terms".to_string()];
    terms.extend(doc.terms.iter().map(|t| format!("  - {}", t)));
    sections.push(terms);

    sections.push(vec![
        "Signature".to_string(),
        format!("  For {}", doc.signature.company_name),
        "  Authorized by: ____________________________  Date: ____________".to_string(),
        format!(
            "  For {}",
            doc.signature.client_name.as_deref().unwrap_or("the client")
        ),
        "  Accepted by:   ____________________________  Date: ____________".to_string(),
    ]);

    sections
}

// =============================================================================
// Unit Tests
// =============================================================================
