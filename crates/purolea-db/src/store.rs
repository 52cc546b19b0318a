//! # Catalog Store
//!
//! The read/create interface the rest of the system uses to reach catalog
//! data, with a SQLite implementation ([`Database`]) and an in-process one
//! ([`MemoryStore`]).
//!
//! ## Dependency Injection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CLI command fn run<S: CatalogStore>(store: &S, ...)                   │
//! │                 │                                                       │
//! │        ┌────────┴────────┐                                              │
//! │        ▼                 ▼                                              │
//! │   ┌──────────┐     ┌─────────────┐                                      │
//! │   │ Database │     │ MemoryStore │                                      │
//! │   │ (SQLite) │     │  (tests)    │                                      │
//! │   └──────────┘     └─────────────┘                                      │
//! │                                                                         │
//! │   No global client: whoever needs the store is handed one.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both implementations apply the same validation and foreign key rules,
//! so a test against [`MemoryStore`] fails wherever SQLite would.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use purolea_core::validation::{
    validate_formula, validate_label_tier, validate_manufacturing_tier, validate_new_quote,
    validate_packaging_option, validate_product,
};
use purolea_core::{
    CatalogSnapshot, Formula, LabelTier, ManufacturingTier, NewQuote, PackagingOption, Product,
    Quote,
};

/// Default page size for quote history.
pub const DEFAULT_QUOTE_LIMIT: u32 = 50;

// =============================================================================
// Trait
// =============================================================================

/// Create/read access to products, formulas, packaging, tiers and quotes.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_products(&self) -> DbResult<Vec<Product>>;

    async fn get_product(&self, id: &str) -> DbResult<Option<Product>>;

    async fn list_formulas(&self) -> DbResult<Vec<Formula>>;

    async fn list_packaging_options(&self) -> DbResult<Vec<PackagingOption>>;

    async fn list_label_tiers(&self) -> DbResult<Vec<LabelTier>>;

    async fn list_manufacturing_tiers(&self) -> DbResult<Vec<ManufacturingTier>>;

    /// Saved quotes, newest first.
    async fn list_quotes(&self, limit: u32) -> DbResult<Vec<Quote>>;

    /// Loads every catalog collection into one snapshot.
    ///
    /// The five reads run concurrently; the snapshot is only returned once
    /// all of them succeed.
    async fn load_catalog(&self) -> DbResult<CatalogSnapshot> {
        let (products, formulas, packaging_options, label_tiers, manufacturing_tiers) = tokio::try_join!(
            self.list_products(),
            self.list_formulas(),
            self.list_packaging_options(),
            self.list_label_tiers(),
            self.list_manufacturing_tiers(),
        )?;

        debug!(
            products = products.len(),
            formulas = formulas.len(),
            packaging = packaging_options.len(),
            label_tiers = label_tiers.len(),
            manufacturing_tiers = manufacturing_tiers.len(),
            "Catalog loaded"
        );

        Ok(CatalogSnapshot {
            products,
            formulas,
            packaging_options,
            label_tiers,
            manufacturing_tiers,
        })
    }

    async fn create_product(&self, product: Product) -> DbResult<Product>;

    async fn create_formula(&self, formula: Formula) -> DbResult<Formula>;

    async fn create_packaging_option(&self, option: PackagingOption) -> DbResult<PackagingOption>;

    async fn create_label_tier(&self, tier: LabelTier) -> DbResult<LabelTier>;

    async fn create_manufacturing_tier(&self, tier: ManufacturingTier) -> DbResult<ManufacturingTier>;

    async fn create_quote(&self, quote: NewQuote) -> DbResult<Quote>;
}

// =============================================================================
// SQLite
// =============================================================================

#[async_trait]
impl CatalogStore for Database {
    async fn list_products(&self) -> DbResult<Vec<Product>> {
        self.products().list().await
    }

    async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        self.products().get_by_id(id).await
    }

    async fn list_formulas(&self) -> DbResult<Vec<Formula>> {
        self.formulas().list().await
    }

    async fn list_packaging_options(&self) -> DbResult<Vec<PackagingOption>> {
        self.packaging().list().await
    }

    async fn list_label_tiers(&self) -> DbResult<Vec<LabelTier>> {
        self.tiers().list_label_tiers().await
    }

    async fn list_manufacturing_tiers(&self) -> DbResult<Vec<ManufacturingTier>> {
        self.tiers().list_manufacturing_tiers().await
    }

    async fn list_quotes(&self, limit: u32) -> DbResult<Vec<Quote>> {
        self.quotes().list_recent(limit).await
    }

    async fn create_product(&self, product: Product) -> DbResult<Product> {
        self.products().insert(&product).await
    }

    async fn create_formula(&self, formula: Formula) -> DbResult<Formula> {
        self.formulas().insert(&formula).await
    }

    async fn create_packaging_option(&self, option: PackagingOption) -> DbResult<PackagingOption> {
        self.packaging().insert(&option).await
    }

    async fn create_label_tier(&self, tier: LabelTier) -> DbResult<LabelTier> {
        self.tiers().insert_label_tier(&tier).await
    }

    async fn create_manufacturing_tier(&self, tier: ManufacturingTier) -> DbResult<ManufacturingTier> {
        self.tiers().insert_manufacturing_tier(&tier).await
    }

    async fn create_quote(&self, quote: NewQuote) -> DbResult<Quote> {
        self.quotes().insert(quote).await
    }
}

// =============================================================================
// In-Memory
// =============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    catalog: CatalogSnapshot,
    /// Oldest first; reversed on read.
    quotes: Vec<Quote>,
}

impl MemoryState {
    fn check_product_link(&self, product_id: Option<&str>) -> DbResult<()> {
        match product_id {
            Some(id) if self.catalog.product(id).is_none() => Err(DbError::ForeignKeyViolation {
                message: format!("no product with id {}", id),
            }),
            _ => Ok(()),
        }
    }
}

/// Catalog Store held in process memory.
///
/// ## Usage
/// ```rust,ignore
/// let store = MemoryStore::new();
/// let product = store.create_product(Product::new("Body Lotion", 8.0)).await?;
/// let catalog = store.load_catalog().await?;
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with a catalog. Records are not validated.
    pub fn with_catalog(catalog: CatalogSnapshot) -> Self {
        MemoryStore {
            state: RwLock::new(MemoryState {
                catalog,
                quotes: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_products(&self) -> DbResult<Vec<Product>> {
        Ok(self.state.read().await.catalog.products.clone())
    }

    async fn get_product(&self, id: &str) -> DbResult<Option<Product>> {
        Ok(self.state.read().await.catalog.product(id).cloned())
    }

    async fn list_formulas(&self) -> DbResult<Vec<Formula>> {
        Ok(self.state.read().await.catalog.formulas.clone())
    }

    async fn list_packaging_options(&self) -> DbResult<Vec<PackagingOption>> {
        Ok(self.state.read().await.catalog.packaging_options.clone())
    }

    async fn list_label_tiers(&self) -> DbResult<Vec<LabelTier>> {
        Ok(self.state.read().await.catalog.label_tiers.clone())
    }

    async fn list_manufacturing_tiers(&self) -> DbResult<Vec<ManufacturingTier>> {
        Ok(self.state.read().await.catalog.manufacturing_tiers.clone())
    }

    async fn list_quotes(&self, limit: u32) -> DbResult<Vec<Quote>> {
        let state = self.state.read().await;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(state.quotes.iter().rev().take(limit).cloned().collect())
    }

    /// Copies the catalog under a single read lock.
    async fn load_catalog(&self) -> DbResult<CatalogSnapshot> {
        Ok(self.state.read().await.catalog.clone())
    }

    async fn create_product(&self, product: Product) -> DbResult<Product> {
        validate_product(&product)?;

        let mut state = self.state.write().await;
        if state.catalog.product(&product.id).is_some() {
            return Err(DbError::duplicate("products.id", product.id));
        }

        let product = Product {
            name: product.name.trim().to_string(),
            ..product
        };
        state.catalog.products.push(product.clone());
        Ok(product)
    }

    async fn create_formula(&self, formula: Formula) -> DbResult<Formula> {
        validate_formula(&formula)?;

        let mut state = self.state.write().await;
        state.check_product_link(formula.product_id.as_deref())?;
        state.catalog.formulas.push(formula.clone());
        Ok(formula)
    }

    async fn create_packaging_option(&self, option: PackagingOption) -> DbResult<PackagingOption> {
        validate_packaging_option(&option)?;

        let mut state = self.state.write().await;
        state.check_product_link(option.product_id.as_deref())?;

        let option = PackagingOption {
            name: option.name.trim().to_string(),
            ..option
        };
        state.catalog.packaging_options.push(option.clone());
        Ok(option)
    }

    async fn create_label_tier(&self, tier: LabelTier) -> DbResult<LabelTier> {
        validate_label_tier(&tier)?;

        let mut state = self.state.write().await;
        state.check_product_link(tier.product_id.as_deref())?;
        state.catalog.label_tiers.push(tier.clone());
        Ok(tier)
    }

    async fn create_manufacturing_tier(&self, tier: ManufacturingTier) -> DbResult<ManufacturingTier> {
        validate_manufacturing_tier(&tier)?;

        let mut state = self.state.write().await;
        state.check_product_link(tier.product_id.as_deref())?;
        state.catalog.manufacturing_tiers.push(tier.clone());
        Ok(tier)
    }

    async fn create_quote(&self, quote: NewQuote) -> DbResult<Quote> {
        validate_new_quote(&quote)?;

        let mut state = self.state.write().await;
        state.check_product_link(quote.product.product_id())?;

        let quote = Quote::from_new(quote);
        state.quotes.push(quote.clone());
        Ok(quote)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use purolea_core::{generate_id, ProductRef, QuoteDraft};

    /// Seeds a store through the trait so both implementations see the
    /// same writes.
    async fn seed<S: CatalogStore>(store: &S) -> Product {
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
        lotion
    }

    async fn quote_flow<S: CatalogStore>(store: &S) {
        let lotion = seed(store).await;
        let catalog = store.load_catalog().await.unwrap();
        assert_eq!(catalog.label_tiers.len(), 3);

        let mut draft = QuoteDraft::new();
        draft.select_product(&catalog, &lotion.id).unwrap();
        draft.set_quantity(500);
        draft.set_client("Acme", "buyer@acme.com");

        let saved = store
            .create_quote(draft.confirm(&catalog, None).unwrap())
            .await
            .unwrap();
        assert_eq!(saved.product_id.as_deref(), Some(lotion.id.as_str()));
        assert_eq!(saved.total_project_cost().cents(), 1_057_500);

        let history = store.list_quotes(DEFAULT_QUOTE_LIMIT).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, saved.id);
    }

    #[tokio::test]
    async fn test_quote_flow_memory() {
        quote_flow(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_quote_flow_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        quote_flow(&db).await;
    }

    async fn newest_defaults_flow<S: CatalogStore>(store: &S) {
        let lotion = seed(store).await;
        store
            .create_formula(Formula::new(Some(lotion.id.clone()), 2.4, None))
            .await
            .unwrap();
        store
            .create_packaging_option(PackagingOption::new(
                Some(lotion.id.clone()),
                "8oz Pump Bottle",
                1.8,
                None,
            ))
            .await
            .unwrap();

        let catalog = store.load_catalog().await.unwrap();
        let mut draft = QuoteDraft::new();
        draft.select_product(&catalog, &lotion.id).unwrap();
        assert_eq!(draft.formula_price_per_oz.cents(), 240);
        assert_eq!(draft.packaging_price.cents(), 180);
    }

    #[tokio::test]
    async fn test_newest_defaults_memory() {
        newest_defaults_flow(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_newest_defaults_sqlite() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        newest_defaults_flow(&db).await;
    }

    #[tokio::test]
    async fn test_memory_store_foreign_keys() {
        let store = MemoryStore::new();
        let err = store
            .create_label_tier(LabelTier::new(Some(generate_id()), 100, 0.5))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_memory_store_validation() {
        let store = MemoryStore::new();
        let err = store
            .create_product(Product::new("  ", 8.0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_memory_store_duplicate_product() {
        let store = MemoryStore::new();
        let product = Product::new("Lotion", 8.0);
        store.create_product(product.clone()).await.unwrap();

        assert!(matches!(
            store.create_product(product).await,
            Err(DbError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_memory_quotes_newest_first() {
        let store = MemoryStore::new();
        for client in ["First", "Second"] {
            store
                .create_quote(NewQuote {
                    product: ProductRef::External("Balm".to_string()),
                    quantity: 100,
                    formula_cost: 100.0,
                    packaging_cost: 0.0,
                    label_cost: 0.0,
                    manufacturing_fee: 0.0,
                    total_unit_cost: 1.0,
                    client_name: client.to_string(),
                    client_email: "a@b.co".to_string(),
                    created_by: None,
                })
                .await
                .unwrap();
        }

        let quotes = store.list_quotes(1).await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].client_name, "Second");
    }

    #[tokio::test]
    async fn test_preloaded_catalog() {
        let catalog = CatalogSnapshot {
            products: vec![Product::new("Serum", 1.0)],
            ..CatalogSnapshot::default()
        };
        let id = catalog.products[0].id.clone();
        let store = MemoryStore::with_catalog(catalog);

        assert!(store.get_product(&id).await.unwrap().is_some());
        assert!(store.list_formulas().await.unwrap().is_empty());
    }
}
