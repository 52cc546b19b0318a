//! # Packaging Option Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use purolea_core::validation::validate_packaging_option;
use purolea_core::PackagingOption;

/// Repository for packaging options.
#[derive(Debug, Clone)]
pub struct PackagingRepository {
    pool: SqlitePool,
}

impl PackagingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        PackagingRepository { pool }
    }

    /// Lists all packaging options in insertion order.
    pub async fn list(&self) -> DbResult<Vec<PackagingOption>> {
        let options = sqlx::query_as::<_, PackagingOption>(
            r#"
            SELECT id, product_id, name, price, supplier, created_at
            FROM packaging_options
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    /// Inserts a packaging option.
    pub async fn insert(&self, option: &PackagingOption) -> DbResult<PackagingOption> {
        validate_packaging_option(option)?;

        debug!(id = %option.id, name = %option.name, "Inserting packaging option");

        sqlx::query(
            r#"
            INSERT INTO packaging_options (id, product_id, name, price, supplier, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&option.id)
        .bind(&option.product_id)
        .bind(option.name.trim())
        .bind(option.price)
        .bind(&option.supplier)
        .bind(option.created_at)
        .execute(&self.pool)
        .await?;

        Ok(PackagingOption {
            name: option.name.trim().to_string(),
            ..option.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use purolea_core::{PackagingOption, Product};

    #[tokio::test]
    async fn test_insert_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db.products().insert(&Product::new("Lotion", 8.0)).await.unwrap();

        db.packaging()
            .insert(&PackagingOption::new(
                Some(product.id.clone()),
                "8oz Airless Pump",
                1.5,
                Some("Acme Containers".to_string()),
            ))
            .await
            .unwrap();

        let options = db.packaging().list().await.unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].price, 1.5);
        assert_eq!(options[0].supplier.as_deref(), Some("Acme Containers"));
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .packaging()
            .insert(&PackagingOption::new(None, " ", 1.0, None))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
