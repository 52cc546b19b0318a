//! # Tier Display Projection
//!
//! Turns a tier table into the price bands shown next to the calculator,
//! e.g. `100-499 units: $0.75`.
//!
//! Bands come from [`TierTable::effective_candidates`], the same list that
//! resolution reads, so a band never advertises a fee the client would not
//! be charged. An empty table shows the fallback schedule instead, with the
//! first band starting at one unit because the fallback charges it below its
//! breakpoint too.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::{format_number, Amount};
use crate::tier::{Tier, TierTable};

/// Smallest quantity a quote can be confirmed with.
const MIN_BAND_QUANTITY: u32 = 1;

/// One displayed price band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBand {
    pub min_quantity: u32,
    /// Inclusive upper bound; `None` for the open-ended last band.
    pub max_quantity: Option<u32>,
    pub unit_fee: Amount,
}

impl PriceBand {
    /// True when `quantity` falls inside this band.
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }

    /// Band with a unit suffix, e.g. `100-499 units: $0.75 per label`.
    pub fn describe(&self, per: &str) -> String {
        format!("{} per {}", self, per)
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = format_number(f64::from(self.min_quantity), 0);
        match self.max_quantity {
            Some(max) => write!(
                f,
                "{}-{} units: {}",
                min,
                format_number(f64::from(max), 0),
                self.unit_fee
            ),
            None => write!(f, "{}+ units: {}", min, self.unit_fee),
        }
    }
}

/// Builds bands from `(min_quantity, fee)` pairs in ascending order.
fn bands_from(thresholds: impl IntoIterator<Item = (u32, Amount)>) -> Vec<PriceBand> {
    let pairs: Vec<(u32, Amount)> = thresholds.into_iter().collect();

    pairs
        .iter()
        .enumerate()
        .map(|(i, &(min_quantity, unit_fee))| PriceBand {
            min_quantity,
            // Next threshold is strictly greater: thresholds are deduplicated.
            max_quantity: pairs.get(i + 1).map(|&(next, _)| next.saturating_sub(1)),
            unit_fee,
        })
        .collect()
}

/// Price bands for a product.
///
/// ## Returns
/// - no product selected → no bands
/// - empty table → the fallback schedule for `T`, since that is what gets
///   charged; its first band starts at one unit
/// - otherwise → one band per distinct candidate threshold
pub fn project_bands<T: Tier>(table: TierTable<'_, T>, product_id: Option<&str>) -> Vec<PriceBand> {
    let Some(product_id) = product_id else {
        return Vec::new();
    };

    if table.is_empty() {
        // The first fallback band also covers quantities below its breakpoint.
        return bands_from(T::FALLBACK.bands.iter().enumerate().map(|(i, band)| {
            let min_quantity = if i == 0 { MIN_BAND_QUANTITY } else { band.min_quantity };
            (min_quantity, Amount::new(band.unit_fee))
        }));
    }

    bands_from(
        table
            .effective_candidates(product_id)
            .into_iter()
            .map(|tier| (tier.min_quantity(), tier.unit_fee())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LabelTier, ManufacturingTier};

    fn render(bands: &[PriceBand]) -> Vec<String> {
        bands.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_three_generic_tiers() {
        let tiers = vec![
            LabelTier::new(None, 500, 0.65),
            LabelTier::new(None, 100, 0.75),
            LabelTier::new(None, 1000, 0.50),
        ];
        let bands = project_bands(TierTable::new(&tiers), Some("p"));

        assert_eq!(
            render(&bands),
            vec![
                "100-499 units: $0.75",
                "500-999 units: $0.65",
                "1,000+ units: $0.50",
            ]
        );
    }

    #[test]
    fn test_bands_agree_with_resolution() {
        let tiers = vec![
            ManufacturingTier::new(None, 100, 4.0),
            ManufacturingTier::new(Some("p".to_string()), 100, 3.8),
            ManufacturingTier::new(None, 100, 9.9),
            ManufacturingTier::new(Some("p".to_string()), 750, 2.9),
        ];
        let table = TierTable::new(&tiers);
        let bands = project_bands(table, Some("p"));

        assert_eq!(bands.len(), 2);
        for quantity in [100, 300, 749, 750, 5000] {
            let band = bands
                .iter()
                .find(|band| band.contains(quantity))
                .expect("every reachable quantity has a band");
            assert_eq!(band.unit_fee, table.fee(Some("p"), quantity));
        }
    }

    #[test]
    fn test_empty_table_shows_fallback() {
        let tiers: Vec<ManufacturingTier> = Vec::new();
        let bands = project_bands(TierTable::new(&tiers), Some("p"));

        assert_eq!(
            render(&bands),
            vec![
                "1-499 units: $4.00",
                "500-999 units: $3.00",
                "1,000+ units: $2.50",
            ]
        );
    }

    #[test]
    fn test_fallback_bands_cover_small_quantities() {
        let tiers: Vec<LabelTier> = Vec::new();
        let table = TierTable::new(&tiers);
        let bands = project_bands(table, Some("p"));

        for quantity in [1, 50, 99, 100, 499, 500, 1000, 20_000] {
            let band = bands
                .iter()
                .find(|band| band.contains(quantity))
                .expect("every confirmable quantity has a band");
            assert_eq!(band.unit_fee, table.fee(Some("p"), quantity));
        }
    }

    #[test]
    fn test_no_product_or_no_candidates() {
        let tiers = vec![LabelTier::new(Some("q".to_string()), 100, 0.5)];
        let table = TierTable::new(&tiers);

        assert!(project_bands(table, None).is_empty());
        assert!(project_bands(table, Some("p")).is_empty());
    }

    #[test]
    fn test_single_band_is_open_ended() {
        let tiers = vec![LabelTier::new(None, 1, 0.9)];
        let bands = project_bands(TierTable::new(&tiers), Some("p"));

        assert_eq!(render(&bands), vec!["1+ units: $0.90"]);
        assert_eq!(bands[0].describe("label"), "1+ units: $0.90 per label");
        assert!(bands[0].contains(u32::MAX));
        assert!(!bands[0].contains(0));
    }
}
