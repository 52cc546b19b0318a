//! # Product Repository
//!
//! Database operations for products.
//!
//! Products are listed in insertion order. That order is what "the first
//! product" means everywhere else, so the queries sort by `rowid` rather
//! than by name.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use purolea_core::validation::validate_product;
use purolea_core::Product;

const SELECT_PRODUCT: &str = "SELECT id, name, size_oz, created_at FROM products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list().await?;
/// let product = repo.get_by_id("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!("{} ORDER BY rowid", SELECT_PRODUCT))
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!("{} WHERE id = ?1", SELECT_PRODUCT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by ID, failing when it doesn't exist.
    pub async fn require(&self, id: &str) -> DbResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored product
    /// * `Err(DbError::Validation)` - Blank or overlong name, non-positive size
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        validate_product(product)?;

        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, size_oz, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&product.id)
        .bind(product.name.trim())
        .bind(product.size_oz)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            name: product.name.trim().to_string(),
            ..product.clone()
        })
    }

    /// Counts products (for diagnostics and the seed guard).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use purolea_core::Product;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = Product::new("  Body Lotion ", 8.0);

        let stored = db.products().insert(&product).await.unwrap();
        assert_eq!(stored.name, "Body Lotion");

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Body Lotion");
        assert_eq!(fetched.size_oz, 8.0);
        assert_eq!(fetched.created_at.timestamp(), product.created_at.timestamp());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        for name in ["Zinc Balm", "Aloe Gel", "Mint Scrub"] {
            db.products().insert(&Product::new(name, 4.0)).await.unwrap();
        }

        let names: Vec<String> = db
            .products()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Zinc Balm", "Aloe Gel", "Mint Scrub"]);
    }

    #[tokio::test]
    async fn test_invalid_product_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.products().insert(&Product::new("", 8.0)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = db.products().insert(&Product::new("Lotion", 0.0)).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_require_missing() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(matches!(
            db.products().require("nope").await,
            Err(DbError::NotFound { .. })
        ));
    }
}
