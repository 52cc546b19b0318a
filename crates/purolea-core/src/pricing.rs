//! # Cost Aggregation
//!
//! Combines flat per-unit costs with resolved tier fees into a
//! [`CostBreakdown`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Per-Unit Cost Model                             │
//! │                                                                         │
//! │  formula    = price_per_oz × size_oz                                    │
//! │  packaging  = ClientSupplied ? 0 : packaging price                      │
//! │  labels     = ClientSupplied ? 0 : resolved label tier fee              │
//! │  manufact.  = resolved manufacturing tier fee   (never overridden)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total_unit_cost    = formula + packaging + labels + manufacturing      │
//! │  total_project_cost = total_unit_cost × quantity                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is rounded before summation. Same inputs give bit-identical
//! outputs, so callers may recompute on every keystroke.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Amount;
use crate::tier::TierTable;
use crate::types::{LabelTier, ManufacturingTier, NewQuote, ProductRef};

// =============================================================================
// Inputs
// =============================================================================

/// Who provides a cost component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Sourcing {
    /// We buy it and charge for it.
    #[default]
    InHouse,
    /// The client ships it to us; it costs nothing on the quote.
    ClientSupplied,
}

impl Sourcing {
    /// Maps a "client provides this" toggle.
    pub fn from_client_supplies(client_supplies: bool) -> Self {
        if client_supplies {
            Sourcing::ClientSupplied
        } else {
            Sourcing::InHouse
        }
    }

    #[inline]
    pub fn is_client_supplied(&self) -> bool {
        matches!(self, Sourcing::ClientSupplied)
    }

    /// Returns `cost` unless the client supplies the component.
    #[inline]
    fn charge(&self, cost: Amount) -> Amount {
        match self {
            Sourcing::InHouse => cost,
            Sourcing::ClientSupplied => Amount::zero(),
        }
    }
}

/// Flat cost inputs for one calculation.
///
/// ## Example
/// ```rust
/// use purolea_core::pricing::{CostInputs, Sourcing};
///
/// let inputs = CostInputs::new(2.00, 8.0, 1.50).packaging(Sourcing::ClientSupplied);
/// assert!(inputs.packaging.is_client_supplied());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostInputs {
    /// Formula price per ounce.
    pub formula_unit_price: Amount,
    /// Unit size in ounces.
    pub product_size: Amount,
    /// Flat packaging price per unit.
    pub packaging_unit_price: Amount,
    pub packaging: Sourcing,
    pub labels: Sourcing,
}

impl CostInputs {
    /// Creates inputs with everything sourced in-house.
    pub fn new(formula_unit_price: f64, product_size: f64, packaging_unit_price: f64) -> Self {
        CostInputs {
            formula_unit_price: Amount::new(formula_unit_price),
            product_size: Amount::new(product_size),
            packaging_unit_price: Amount::new(packaging_unit_price),
            packaging: Sourcing::InHouse,
            labels: Sourcing::InHouse,
        }
    }

    pub fn packaging(mut self, sourcing: Sourcing) -> Self {
        self.packaging = sourcing;
        self
    }

    pub fn labels(mut self, sourcing: Sourcing) -> Self {
        self.labels = sourcing;
        self
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// The four cost components, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CostComponent {
    Formula,
    Packaging,
    Labels,
    Manufacturing,
}

impl CostComponent {
    pub const ALL: [CostComponent; 4] = [
        CostComponent::Formula,
        CostComponent::Packaging,
        CostComponent::Labels,
        CostComponent::Manufacturing,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CostComponent::Formula => "Formula Cost",
            CostComponent::Packaging => "Packaging",
            CostComponent::Labels => "Label Printing",
            CostComponent::Manufacturing => "Manufacturing",
        }
    }
}

/// Fully derived cost breakdown. Recomputed on every input change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub quantity: u32,
    pub formula_cost_per_unit: Amount,
    pub packaging_cost_per_unit: Amount,
    pub label_cost_per_unit: Amount,
    pub manufacturing_fee_per_unit: Amount,
    pub total_unit_cost: Amount,
    pub total_project_cost: Amount,
}

impl CostBreakdown {
    /// Per-unit cost of one component.
    pub fn per_unit(&self, component: CostComponent) -> Amount {
        match component {
            CostComponent::Formula => self.formula_cost_per_unit,
            CostComponent::Packaging => self.packaging_cost_per_unit,
            CostComponent::Labels => self.label_cost_per_unit,
            CostComponent::Manufacturing => self.manufacturing_fee_per_unit,
        }
    }

    /// Component cost for the whole run (per-unit × quantity).
    pub fn extended(&self, component: CostComponent) -> Amount {
        self.per_unit(component).times(self.quantity)
    }

    /// Snapshots this breakdown into a quote record.
    pub fn to_new_quote(
        &self,
        product: ProductRef,
        client_name: impl Into<String>,
        client_email: impl Into<String>,
        created_by: Option<String>,
    ) -> NewQuote {
        NewQuote {
            product,
            quantity: self.quantity,
            formula_cost: self.extended(CostComponent::Formula).value(),
            packaging_cost: self.extended(CostComponent::Packaging).value(),
            label_cost: self.extended(CostComponent::Labels).value(),
            manufacturing_fee: self.extended(CostComponent::Manufacturing).value(),
            total_unit_cost: self.total_unit_cost.value(),
            client_name: client_name.into(),
            client_email: client_email.into(),
            created_by,
        }
    }
}

/// Aggregates flat costs and resolved fees into a breakdown.
///
/// Total for any well-formed input; never fails.
pub fn aggregate(
    inputs: &CostInputs,
    quantity: u32,
    label_fee: impl Into<Amount>,
    manufacturing_fee: impl Into<Amount>,
) -> CostBreakdown {
    let formula_cost_per_unit = inputs.formula_unit_price.per_size(inputs.product_size);
    let packaging_cost_per_unit = inputs.packaging.charge(inputs.packaging_unit_price);
    let label_cost_per_unit = inputs.labels.charge(label_fee.into());
    let manufacturing_fee_per_unit = manufacturing_fee.into();

    let total_unit_cost = formula_cost_per_unit
        + packaging_cost_per_unit
        + label_cost_per_unit
        + manufacturing_fee_per_unit;

    CostBreakdown {
        quantity,
        formula_cost_per_unit,
        packaging_cost_per_unit,
        label_cost_per_unit,
        manufacturing_fee_per_unit,
        total_unit_cost,
        total_project_cost: total_unit_cost.times(quantity),
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Tier tables plus aggregation: everything needed to price a product.
///
/// Borrows its tables and holds no mutable state, so one engine can price
/// any number of quantities (the export document prices three).
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    labels: TierTable<'a, LabelTier>,
    manufacturing: TierTable<'a, ManufacturingTier>,
}

impl<'a> PricingEngine<'a> {
    pub fn new(label_tiers: &'a [LabelTier], manufacturing_tiers: &'a [ManufacturingTier]) -> Self {
        PricingEngine {
            labels: TierTable::new(label_tiers),
            manufacturing: TierTable::new(manufacturing_tiers),
        }
    }

    pub fn label_tiers(&self) -> TierTable<'a, LabelTier> {
        self.labels
    }

    pub fn manufacturing_tiers(&self) -> TierTable<'a, ManufacturingTier> {
        self.manufacturing
    }

    /// Label cost per unit before the client-supplied override.
    pub fn label_fee(&self, product_id: Option<&str>, quantity: u32) -> Amount {
        self.labels.fee(product_id, quantity)
    }

    /// Manufacturing fee per unit.
    pub fn manufacturing_fee(&self, product_id: Option<&str>, quantity: u32) -> Amount {
        self.manufacturing.fee(product_id, quantity)
    }

    /// Prices a product at a quantity.
    pub fn quote(&self, product_id: Option<&str>, inputs: &CostInputs, quantity: u32) -> CostBreakdown {
        aggregate(
            inputs,
            quantity,
            self.label_fee(product_id, quantity),
            self.manufacturing_fee(product_id, quantity),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_client_supplied_components_cost_nothing() {
        for price in [0.0, 0.01, 1.5, 99.99] {
            let inputs = CostInputs::new(2.0, 8.0, price)
                .packaging(Sourcing::ClientSupplied)
                .labels(Sourcing::ClientSupplied);
            let breakdown = aggregate(&inputs, 250, 0.75, 4.0);

            assert!(breakdown.packaging_cost_per_unit.is_zero());
            assert!(breakdown.label_cost_per_unit.is_zero());
            assert_eq!(breakdown.manufacturing_fee_per_unit.value(), 4.0);
        }
    }

    #[test]
    fn test_total_is_exact_sum_of_components() {
        let inputs = CostInputs::new(0.035, 8.5, 0.333);
        let breakdown = aggregate(&inputs, 777, 0.127, 2.2);

        let sum = breakdown.formula_cost_per_unit.value()
            + breakdown.packaging_cost_per_unit.value()
            + breakdown.label_cost_per_unit.value()
            + breakdown.manufacturing_fee_per_unit.value();
        assert_eq!(breakdown.total_unit_cost.value().to_bits(), sum.to_bits());
    }

    #[test]
    fn test_project_total_scales_with_quantity() {
        let inputs = CostInputs::new(1.1, 3.3, 0.7);
        for quantity in [1, 7, 100, 499, 500, 12_345] {
            let breakdown = aggregate(&inputs, quantity, 0.6, 2.5);
            assert_eq!(
                breakdown.total_project_cost.value().to_bits(),
                (breakdown.total_unit_cost.value() * f64::from(quantity)).to_bits()
            );
        }
    }

    #[test]
    fn test_recomputation_is_bit_identical() {
        let inputs = CostInputs::new(2.17, 6.4, 1.19);
        let first = aggregate(&inputs, 640, 0.71, 3.3);
        let second = aggregate(&inputs, 640, 0.71, 3.3);

        assert_eq!(
            first.total_project_cost.value().to_bits(),
            second.total_project_cost.value().to_bits()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_bad_inputs_become_zero() {
        let inputs = CostInputs::new(f64::NAN, -8.0, f64::INFINITY);
        let breakdown = aggregate(&inputs, 100, -1.0, f64::NAN);

        assert!(breakdown.total_unit_cost.is_zero());
        assert!(breakdown.total_project_cost.is_zero());
    }

    #[test]
    fn test_extended_costs_and_new_quote() {
        let inputs = CostInputs::new(2.0, 8.0, 1.5);
        let breakdown = aggregate(&inputs, 500, 0.65, 3.0);

        assert!((breakdown.extended(CostComponent::Formula).value() - 8000.0).abs() < EPSILON);
        assert!((breakdown.extended(CostComponent::Packaging).value() - 750.0).abs() < EPSILON);

        let quote = breakdown.to_new_quote(
            ProductRef::Catalog("p-1".to_string()),
            "Acme",
            "buyer@acme.com",
            Some("admin@purolea.com".to_string()),
        );
        assert_eq!(quote.quantity, 500);
        assert!((quote.label_cost - 325.0).abs() < EPSILON);
        assert!((quote.manufacturing_fee - 1500.0).abs() < EPSILON);
        assert!((quote.total_unit_cost - 21.15).abs() < EPSILON);
    }

    #[test]
    fn test_engine_uses_tier_tables() {
        let labels = vec![LabelTier::new(None, 100, 0.75)];
        let manufacturing = vec![ManufacturingTier::new(Some("p".to_string()), 100, 4.0)];
        let engine = PricingEngine::new(&labels, &manufacturing);

        let breakdown = engine.quote(Some("p"), &CostInputs::new(1.0, 1.0, 0.0), 100);
        assert_eq!(breakdown.label_cost_per_unit.value(), 0.75);
        assert_eq!(breakdown.manufacturing_fee_per_unit.value(), 4.0);

        // Non-empty table, other product: no fallback.
        let other = engine.quote(Some("q"), &CostInputs::default(), 100);
        assert!(other.manufacturing_fee_per_unit.is_zero());
    }

    #[test]
    fn test_sourcing_from_toggle() {
        assert_eq!(Sourcing::from_client_supplies(true), Sourcing::ClientSupplied);
        assert_eq!(Sourcing::from_client_supplies(false), Sourcing::InHouse);
        assert_eq!(Sourcing::default(), Sourcing::InHouse);
    }
}
