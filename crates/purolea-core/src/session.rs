//! # Quote Draft
//!
//! The editable state behind the calculator: a selected product, cost
//! inputs the user may override, sourcing toggles and client details.
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  QuoteDraft::new()          quantity 100, everything else empty         │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  select_product(catalog, id)                                            │
//! │        ├── formula price  ← newest formula linked to the product        │
//! │        ├── size           ← product.size_oz                             │
//! │        └── packaging      ← newest packaging option for the product     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  set_* overrides  ──►  breakdown(catalog)   (recomputed every call)     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  confirm(catalog, created_by)  ──►  NewQuote  (validated snapshot)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft never caches a breakdown. Every read goes back through the
//! engine with the catalog passed in, so it always reflects the latest
//! loaded snapshot.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogSnapshot;
use crate::error::{CoreError, CoreResult};
use crate::money::Amount;
use crate::pricing::{CostBreakdown, CostInputs, Sourcing};
use crate::types::{NewQuote, ProductRef};
use crate::validation::{validate_client_email, validate_client_name, validate_quantity};
use crate::DEFAULT_QUANTITY;

/// Parses a typed quantity, keeping leading digits and treating anything
/// else as zero.
///
/// ## Example
/// ```rust
/// use purolea_core::session::parse_quantity_lenient;
///
/// assert_eq!(parse_quantity_lenient("500"), 500);
/// assert_eq!(parse_quantity_lenient(" 12.7 "), 12);
/// assert_eq!(parse_quantity_lenient("-5"), 0);
/// assert_eq!(parse_quantity_lenient("lots"), 0);
/// ```
pub fn parse_quantity_lenient(input: &str) -> u32 {
    let input = input.trim();
    let digits_end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let digits = &input[..digits_end];

    if digits.is_empty() {
        return 0;
    }

    digits.parse::<u32>().unwrap_or(u32::MAX)
}

/// Editable quote state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDraft {
    pub product: Option<ProductRef>,
    pub formula_price_per_oz: Amount,
    pub size_oz: Amount,
    pub packaging_price: Amount,
    pub quantity: u32,
    pub packaging: Sourcing,
    pub labels: Sourcing,
    pub notes: Option<String>,
    pub client_name: String,
    pub client_email: String,
}

impl Default for QuoteDraft {
    fn default() -> Self {
        QuoteDraft {
            product: None,
            formula_price_per_oz: Amount::zero(),
            size_oz: Amount::zero(),
            packaging_price: Amount::zero(),
            quantity: DEFAULT_QUANTITY,
            packaging: Sourcing::InHouse,
            labels: Sourcing::InHouse,
            notes: None,
            client_name: String::new(),
            client_email: String::new(),
        }
    }
}

impl QuoteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Product Selection
    // =========================================================================

    /// Selects a catalog product and loads its default cost inputs.
    ///
    /// Missing formula or packaging records leave those inputs at zero.
    pub fn select_product(&mut self, catalog: &CatalogSnapshot, product_id: &str) -> CoreResult<()> {
        let product = catalog
            .product(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        self.product = Some(ProductRef::Catalog(product.id.clone()));
        self.size_oz = product.size();
        self.formula_price_per_oz = catalog
            .formula_for(product_id)
            .map(|f| f.unit_price())
            .unwrap_or_default();
        self.packaging_price = catalog
            .packaging_for(product_id)
            .map(|p| p.unit_price())
            .unwrap_or_default();

        Ok(())
    }

    /// Uses a product known only by name (no catalog record).
    ///
    /// Tier fees resolve to zero for such a product; the inputs must be
    /// entered by hand.
    pub fn use_external_product(&mut self, name: impl Into<String>) {
        self.product = Some(ProductRef::External(name.into()));
    }

    /// Catalog id of the selected product, if any.
    pub fn product_id(&self) -> Option<&str> {
        self.product.as_ref().and_then(ProductRef::product_id)
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    pub fn set_formula_price(&mut self, price_per_oz: f64) {
        self.formula_price_per_oz = Amount::new(price_per_oz);
    }

    pub fn set_size(&mut self, size_oz: f64) {
        self.size_oz = Amount::new(size_oz);
    }

    pub fn set_packaging_price(&mut self, price: f64) {
        self.packaging_price = Amount::new(price);
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn set_packaging(&mut self, sourcing: Sourcing) {
        self.packaging = sourcing;
    }

    pub fn set_labels(&mut self, sourcing: Sourcing) {
        self.labels = sourcing;
    }

    pub fn set_client(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.client_name = name.into();
        self.client_email = email.into();
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Cost inputs as currently entered.
    pub fn inputs(&self) -> CostInputs {
        CostInputs {
            formula_unit_price: self.formula_price_per_oz,
            product_size: self.size_oz,
            packaging_unit_price: self.packaging_price,
            packaging: self.packaging,
            labels: self.labels,
        }
    }

    /// Prices the draft at its current quantity.
    pub fn breakdown(&self, catalog: &CatalogSnapshot) -> CostBreakdown {
        self.breakdown_at(catalog, self.quantity)
    }

    /// Prices the draft at another quantity, keeping every other input.
    pub fn breakdown_at(&self, catalog: &CatalogSnapshot, quantity: u32) -> CostBreakdown {
        catalog
            .engine()
            .quote(self.product_id(), &self.inputs(), quantity)
    }

    // =========================================================================
    // Confirmation
    // =========================================================================

    /// Validates the draft and snapshots it into a quote record.
    ///
    /// ## Errors
    /// - no product, or a blank external name → [`CoreError::NoProductSelected`]
    /// - blank client name or malformed email → [`CoreError::Validation`]
    /// - zero or excessive quantity → [`CoreError::Validation`]
    pub fn confirm(&self, catalog: &CatalogSnapshot, created_by: Option<String>) -> CoreResult<NewQuote> {
        let product = match &self.product {
            Some(ProductRef::External(name)) if name.trim().is_empty() => {
                return Err(CoreError::NoProductSelected)
            }
            Some(ProductRef::External(name)) => ProductRef::External(name.trim().to_string()),
            Some(ProductRef::Catalog(id)) => ProductRef::Catalog(id.clone()),
            None => return Err(CoreError::NoProductSelected),
        };

        validate_client_name(&self.client_name)?;
        validate_client_email(&self.client_email)?;
        validate_quantity(self.quantity)?;

        Ok(self.breakdown(catalog).to_new_quote(
            product,
            self.client_name.trim(),
            self.client_email.trim(),
            created_by,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
