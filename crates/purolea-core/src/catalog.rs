//! # Catalog Snapshot
//!
//! An in-memory copy of the five catalog collections. The engine only ever
//! reads a snapshot; loading one is the Catalog Store's job.
//!
//! ```text
//! ┌────────────┐   load_catalog()   ┌──────────────────┐   engine()   ┌───────────────┐
//! │ CatalogStore│ ────────────────► │ CatalogSnapshot  │ ───────────► │ PricingEngine │
//! └────────────┘                    └──────────────────┘              └───────────────┘
//! ```
//!
//! Collections keep the order the store returned them in. Lookups that
//! pick "the" formula or packaging option for a product take the first
//! match in that order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pricing::PricingEngine;
use crate::projection::{project_bands, PriceBand};
use crate::types::{Formula, LabelTier, ManufacturingTier, PackagingOption, Product};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub formulas: Vec<Formula>,
    pub packaging_options: Vec<PackagingOption>,
    pub label_tiers: Vec<LabelTier>,
    pub manufacturing_tiers: Vec<ManufacturingTier>,
}

impl CatalogSnapshot {
    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Most recently created formula linked to the product.
    ///
    /// Store reads return records in creation order, so the last match wins.
    pub fn formula_for(&self, product_id: &str) -> Option<&Formula> {
        self.formulas
            .iter()
            .rev()
            .find(|f| f.product_id.as_deref() == Some(product_id))
    }

    /// Most recently created packaging option linked to the product.
    pub fn packaging_for(&self, product_id: &str) -> Option<&PackagingOption> {
        self.packaging_options
            .iter()
            .rev()
            .find(|p| p.product_id.as_deref() == Some(product_id))
    }

    /// Case-insensitive product lookup by name.
    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        let name = name.trim();
        self.products
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Pricing engine over this snapshot's tier tables.
    pub fn engine(&self) -> PricingEngine<'_> {
        PricingEngine::new(&self.label_tiers, &self.manufacturing_tiers)
    }

    /// Label price bands for display.
    pub fn label_bands(&self, product_id: Option<&str>) -> Vec<PriceBand> {
        project_bands(self.engine().label_tiers(), product_id)
    }

    /// Manufacturing price bands for display.
    pub fn manufacturing_bands(&self, product_id: Option<&str>) -> Vec<PriceBand> {
        project_bands(self.engine().manufacturing_tiers(), product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> (CatalogSnapshot, String) {
        let lotion = Product::new("Body Lotion", 8.0);
        let id = lotion.id.clone();
        let catalog = CatalogSnapshot {
            products: vec![lotion],
            formulas: vec![
                Formula::new(Some("other".to_string()), 9.0, None),
                Formula::new(Some(id.clone()), 2.0, None),
                Formula::new(Some(id.clone()), 3.0, None),
            ],
            packaging_options: vec![
                PackagingOption::new(None, "Generic Jar", 0.9, None),
                PackagingOption::new(Some(id.clone()), "8oz Bottle", 1.5, None),
                PackagingOption::new(Some(id.clone()), "8oz Pump Bottle", 1.8, None),
                PackagingOption::new(None, "Sample Sachet", 0.1, None),
            ],
            label_tiers: Vec::new(),
            manufacturing_tiers: Vec::new(),
        };
        (catalog, id)
    }

    #[test]
    fn test_newest_linked_record_wins() {
        let (catalog, id) = snapshot();

        assert_eq!(catalog.formula_for(&id).map(|f| f.price_per_oz), Some(3.0));
        assert_eq!(catalog.packaging_for(&id).map(|p| p.name.as_str()), Some("8oz Pump Bottle"));
        assert!(catalog.formula_for("missing").is_none());
    }

    #[test]
    fn test_product_lookups() {
        let (catalog, id) = snapshot();

        assert_eq!(catalog.product(&id).map(|p| p.size_oz), Some(8.0));
        assert_eq!(catalog.product_by_name(" body lotion ").map(|p| p.id.as_str()), Some(id.as_str()));
        assert!(catalog.product("nope").is_none());
    }

    #[test]
    fn test_empty_tier_tables_project_fallback() {
        let (catalog, id) = snapshot();

        assert_eq!(catalog.label_bands(Some(&id)).len(), 3);
        assert_eq!(catalog.manufacturing_bands(Some(&id))[0].unit_fee.value(), 4.0);
        assert!(catalog.label_bands(None).is_empty());
    }
}
