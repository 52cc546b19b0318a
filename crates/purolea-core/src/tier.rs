//! # Tier Resolution
//!
//! Picks the price band that applies to a product at a given quantity.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    resolve(product "P", quantity 600)                   │
//! │                                                                         │
//! │  Tier table                      Candidates (P ∪ generic), ascending    │
//! │  ───────────────────────         ──────────────────────────────────     │
//! │  P      min 100  $0.80    ──►    min 100  $0.80  (P beats generic)      │
//! │  (any)  min 100  $0.75           min 500  $0.65                         │
//! │  (any)  min 500  $0.65           min 1000 $0.60                         │
//! │  Q      min 500  $0.10  (ignored: other product)                        │
//! │  (any)  min 1000 $0.60                                                  │
//! │                                                                         │
//! │  Largest min ≤ 600  ──►  Resolved { min 500, $0.65 }                    │
//! │                                                                         │
//! │  quantity below every candidate  ──►  NoMatch     (fee $0.00)           │
//! │  table holds no records at all   ──►  NoTierData  (fallback schedule)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both scopes are always considered together; the generic tiers are not a
//! second pass that only runs when the product has none of its own. At an
//! equal threshold the product-specific tier wins, and among records of the
//! same scope and threshold the earliest one in the table wins.

use serde::{Deserialize, Serialize};

use crate::money::Amount;
use crate::types::{LabelTier, ManufacturingTier};

// =============================================================================
// Fallback Schedules
// =============================================================================

/// One band of a hard-coded fallback schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackBand {
    pub min_quantity: u32,
    pub unit_fee: f64,
}

/// Quantity-only price schedule used before any tier data has been loaded.
///
/// Product scoping does not apply. Quantities below the first breakpoint are
/// charged the first band's fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackSchedule {
    pub bands: &'static [FallbackBand],
}

impl FallbackSchedule {
    /// Fee for a quantity under this schedule.
    pub fn fee(&self, quantity: u32) -> Amount {
        self.bands
            .iter()
            .rev()
            .find(|band| band.min_quantity <= quantity)
            .or_else(|| self.bands.first())
            .map(|band| Amount::new(band.unit_fee))
            .unwrap_or_default()
    }
}

/// Breakpoints shared by both fallback schedules.
pub const FALLBACK_BREAKPOINTS: [u32; 3] = [100, 500, 1000];

/// Manufacturing fee per unit when no manufacturing tiers exist.
pub const MANUFACTURING_FALLBACK: FallbackSchedule = FallbackSchedule {
    bands: &[
        FallbackBand {
            min_quantity: FALLBACK_BREAKPOINTS[0],
            unit_fee: 4.00,
        },
        FallbackBand {
            min_quantity: FALLBACK_BREAKPOINTS[1],
            unit_fee: 3.00,
        },
        FallbackBand {
            min_quantity: FALLBACK_BREAKPOINTS[2],
            unit_fee: 2.50,
        },
    ],
};

/// Label cost per unit when no label tiers exist.
pub const LABEL_FALLBACK: FallbackSchedule = FallbackSchedule {
    bands: &[
        FallbackBand {
            min_quantity: FALLBACK_BREAKPOINTS[0],
            unit_fee: 0.75,
        },
        FallbackBand {
            min_quantity: FALLBACK_BREAKPOINTS[1],
            unit_fee: 0.65,
        },
        FallbackBand {
            min_quantity: FALLBACK_BREAKPOINTS[2],
            unit_fee: 0.50,
        },
    ],
};

// =============================================================================
// Tier Trait
// =============================================================================

/// A (product scope, minimum quantity, unit fee) price band.
pub trait Tier {
    /// Schedule charged when the whole table is empty.
    const FALLBACK: FallbackSchedule;

    /// `None` for generic tiers that apply to every product.
    fn product_id(&self) -> Option<&str>;

    fn min_quantity(&self) -> u32;

    fn unit_fee(&self) -> Amount;
}

impl Tier for LabelTier {
    const FALLBACK: FallbackSchedule = LABEL_FALLBACK;

    fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    fn unit_fee(&self) -> Amount {
        Amount::new(self.label_cost)
    }
}

impl Tier for ManufacturingTier {
    const FALLBACK: FallbackSchedule = MANUFACTURING_FALLBACK;

    fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    fn min_quantity(&self) -> u32 {
        self.min_quantity
    }

    fn unit_fee(&self) -> Amount {
        Amount::new(self.fee_per_unit)
    }
}

// =============================================================================
// Resolution Result
// =============================================================================

/// Outcome of resolving a tier.
///
/// `NoMatch` and `NoTierData` both mean "no tier", but they are charged
/// differently: zero versus the fallback schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TierResolution {
    /// A candidate tier applies.
    Resolved { min_quantity: u32, unit_fee: Amount },
    /// Candidates exist (or the table is non-empty) but none is reachable.
    NoMatch,
    /// The table holds no records for any product.
    NoTierData,
}

impl TierResolution {
    /// Threshold of the resolved tier, if any.
    pub fn min_quantity(&self) -> Option<u32> {
        match self {
            TierResolution::Resolved { min_quantity, .. } => Some(*min_quantity),
            _ => None,
        }
    }
}

// =============================================================================
// Tier Table
// =============================================================================

/// A borrowed tier table with resolution helpers.
#[derive(Debug)]
pub struct TierTable<'a, T> {
    tiers: &'a [T],
}

// Manual impls: a derive would require `T: Clone`.
impl<T> Clone for TierTable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TierTable<'_, T> {}

impl<'a, T: Tier> TierTable<'a, T> {
    pub fn new(tiers: &'a [T]) -> Self {
        TierTable { tiers }
    }

    /// True when no tier data has been loaded at all.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// All tiers applicable to `product_id`, ascending by threshold.
    ///
    /// At equal thresholds product-specific tiers sort first; otherwise
    /// table order is kept.
    pub fn candidates(&self, product_id: &str) -> Vec<&'a T> {
        let mut candidates: Vec<&'a T> = self
            .tiers
            .iter()
            .filter(|tier| match tier.product_id() {
                Some(id) => id == product_id,
                None => true,
            })
            .collect();

        candidates.sort_by_key(|tier| (tier.min_quantity(), tier.product_id().is_none()));
        candidates
    }

    /// One tier per threshold: the one that would be charged.
    ///
    /// Resolution and display both read from this list, so the bands shown
    /// to a client always match what they are charged.
    pub fn effective_candidates(&self, product_id: &str) -> Vec<&'a T> {
        let mut candidates = self.candidates(product_id);
        candidates.dedup_by_key(|tier| tier.min_quantity());
        candidates
    }

    /// Resolves the tier for a product and quantity.
    pub fn resolve(&self, product_id: &str, quantity: u32) -> TierResolution {
        if self.is_empty() {
            return TierResolution::NoTierData;
        }

        self.effective_candidates(product_id)
            .into_iter()
            .rev()
            .find(|tier| tier.min_quantity() <= quantity)
            .map(|tier| TierResolution::Resolved {
                min_quantity: tier.min_quantity(),
                unit_fee: tier.unit_fee(),
            })
            .unwrap_or(TierResolution::NoMatch)
    }

    /// Per-unit fee to charge.
    ///
    /// ## Returns
    /// - no product selected → `$0.00`
    /// - `Resolved` → the tier's fee
    /// - `NoMatch` → `$0.00`
    /// - `NoTierData` → the fallback schedule for `T`
    pub fn fee(&self, product_id: Option<&str>, quantity: u32) -> Amount {
        let Some(product_id) = product_id else {
            return Amount::zero();
        };

        match self.resolve(product_id, quantity) {
            TierResolution::Resolved { unit_fee, .. } => unit_fee,
            TierResolution::NoMatch => Amount::zero(),
            TierResolution::NoTierData => T::FALLBACK.fee(quantity),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn label(product_id: Option<&str>, min: u32, cost: f64) -> LabelTier {
        LabelTier::new(product_id.map(str::to_string), min, cost)
    }

    fn manufacturing(product_id: Option<&str>, min: u32, fee: f64) -> ManufacturingTier {
        ManufacturingTier::new(product_id.map(str::to_string), min, fee)
    }

    fn standard_manufacturing() -> Vec<ManufacturingTier> {
        vec![
            manufacturing(None, 1000, 2.50),
            manufacturing(None, 100, 4.00),
            manufacturing(None, 500, 3.00),
        ]
    }

    #[test]
    fn test_picks_largest_threshold_at_or_below_quantity() {
        let tiers = standard_manufacturing();
        let table = TierTable::new(&tiers);

        assert_eq!(table.fee(Some("p"), 100).value(), 4.00);
        assert_eq!(table.fee(Some("p"), 499).value(), 4.00);
        assert_eq!(table.fee(Some("p"), 500).value(), 3.00);
        assert_eq!(table.fee(Some("p"), 999).value(), 3.00);
        assert_eq!(table.fee(Some("p"), 1000).value(), 2.50);
        assert_eq!(table.fee(Some("p"), 50_000).value(), 2.50);
    }

    #[test]
    fn test_below_lowest_threshold_is_no_match() {
        let tiers = standard_manufacturing();
        let table = TierTable::new(&tiers);

        assert_eq!(table.resolve("p", 50), TierResolution::NoMatch);
        assert!(table.fee(Some("p"), 50).is_zero());
    }

    #[test]
    fn test_empty_table_uses_fallback_schedule() {
        let tiers: Vec<ManufacturingTier> = Vec::new();
        let table = TierTable::new(&tiers);

        assert_eq!(table.resolve("any", 250), TierResolution::NoTierData);
        assert_eq!(table.fee(Some("any"), 250).value(), 4.00);
        assert_eq!(table.fee(Some("any"), 600).value(), 3.00);
        assert_eq!(table.fee(Some("any"), 1500).value(), 2.50);
        assert_eq!(table.fee(Some("any"), 20).value(), 4.00);

        let labels: Vec<LabelTier> = Vec::new();
        let table = TierTable::new(&labels);
        assert_eq!(table.fee(Some("any"), 250).value(), 0.75);
        assert_eq!(table.fee(Some("any"), 600).value(), 0.65);
        assert_eq!(table.fee(Some("any"), 1500).value(), 0.50);
    }

    #[test]
    fn test_other_products_tiers_do_not_trigger_fallback() {
        let tiers = vec![label(Some("other"), 100, 0.10)];
        let table = TierTable::new(&tiers);

        assert_eq!(table.resolve("mine", 500), TierResolution::NoMatch);
        assert!(table.fee(Some("mine"), 500).is_zero());
    }

    #[test]
    fn test_no_product_selected_charges_nothing() {
        let tiers: Vec<ManufacturingTier> = Vec::new();
        let table = TierTable::new(&tiers);
        assert!(table.fee(None, 500).is_zero());
    }

    #[test]
    fn test_generic_and_specific_are_both_candidates() {
        let tiers = vec![
            label(Some("p"), 100, 0.80),
            label(None, 500, 0.65),
            label(Some("q"), 500, 0.10),
        ];
        let table = TierTable::new(&tiers);

        // The product has a tier of its own, yet the generic 500 band still applies.
        assert_eq!(
            table.resolve("p", 600),
            TierResolution::Resolved {
                min_quantity: 500,
                unit_fee: Amount::new(0.65)
            }
        );
        assert_eq!(table.fee(Some("p"), 200).value(), 0.80);
    }

    #[test]
    fn test_specific_tier_wins_at_equal_threshold() {
        let tiers = vec![label(None, 100, 0.75), label(Some("p"), 100, 0.70)];
        let table = TierTable::new(&tiers);

        assert_eq!(table.fee(Some("p"), 150).value(), 0.70);
        assert_eq!(table.fee(Some("other"), 150).value(), 0.75);
    }

    #[test]
    fn test_duplicate_threshold_same_scope_first_wins() {
        let tiers = vec![label(None, 100, 0.75), label(None, 100, 0.99)];
        let table = TierTable::new(&tiers);

        assert_eq!(table.fee(Some("p"), 150).value(), 0.75);
        assert_eq!(table.effective_candidates("p").len(), 1);
    }

    #[test]
    fn test_resolved_threshold_is_monotonic_in_quantity() {
        let tiers = vec![
            manufacturing(None, 100, 4.00),
            manufacturing(Some("p"), 250, 3.50),
            manufacturing(None, 500, 3.00),
            manufacturing(Some("p"), 750, 2.75),
            manufacturing(None, 1000, 2.50),
        ];
        let table = TierTable::new(&tiers);

        let mut previous = 0;
        for quantity in 100..=2000 {
            let min = table
                .resolve("p", quantity)
                .min_quantity()
                .expect("quantity is above the lowest threshold");
            assert!(min >= previous, "threshold went down at quantity {}", quantity);
            assert!(min <= quantity);
            previous = min;
        }
    }

    #[test]
    fn test_negative_fee_is_charged_as_zero() {
        let tiers = vec![manufacturing(None, 1, -5.0)];
        let table = TierTable::new(&tiers);
        assert!(table.fee(Some("p"), 10).is_zero());
    }

    #[test]
    fn test_zero_threshold_matches_every_quantity() {
        let tiers = vec![manufacturing(None, 0, 1.25)];
        let table = TierTable::new(&tiers);
        assert_eq!(table.fee(Some("p"), 0).value(), 1.25);
    }
}
