//! # Tier Repository
//!
//! Label and manufacturing tiers live in two tables with the same shape.
//!
//! ```text
//! label_tiers          (id, product_id?, min_quantity, label_cost,   created_at)
//! manufacturing_tiers  (id, product_id?, min_quantity, fee_per_unit, created_at)
//! ```
//!
//! Rows come back in insertion order. Resolution sorts by threshold itself
//! and uses insertion order only to break ties between duplicates.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use purolea_core::validation::{validate_label_tier, validate_manufacturing_tier};
use purolea_core::{LabelTier, ManufacturingTier};

/// Repository for both tier tables.
#[derive(Debug, Clone)]
pub struct TierRepository {
    pool: SqlitePool,
}

impl TierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TierRepository { pool }
    }

    // =========================================================================
    // Label Tiers
    // =========================================================================

    pub async fn list_label_tiers(&self) -> DbResult<Vec<LabelTier>> {
        let tiers = sqlx::query_as::<_, LabelTier>(
            r#"
            SELECT id, product_id, min_quantity, label_cost, created_at
            FROM label_tiers
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tiers)
    }

    pub async fn insert_label_tier(&self, tier: &LabelTier) -> DbResult<LabelTier> {
        validate_label_tier(tier)?;

        debug!(
            id = %tier.id,
            product_id = ?tier.product_id,
            min_quantity = tier.min_quantity,
            "Inserting label tier"
        );

        sqlx::query(
            r#"
            INSERT INTO label_tiers (id, product_id, min_quantity, label_cost, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&tier.id)
        .bind(&tier.product_id)
        .bind(tier.min_quantity)
        .bind(tier.label_cost)
        .bind(tier.created_at)
        .execute(&self.pool)
        .await?;

        Ok(tier.clone())
    }

    // =========================================================================
    // Manufacturing Tiers
    // =========================================================================

    pub async fn list_manufacturing_tiers(&self) -> DbResult<Vec<ManufacturingTier>> {
        let tiers = sqlx::query_as::<_, ManufacturingTier>(
            r#"
            SELECT id, product_id, min_quantity, fee_per_unit, created_at
            FROM manufacturing_tiers
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tiers)
    }

    pub async fn insert_manufacturing_tier(
        &self,
        tier: &ManufacturingTier,
    ) -> DbResult<ManufacturingTier> {
        validate_manufacturing_tier(tier)?;

        debug!(
            id = %tier.id,
            product_id = ?tier.product_id,
            min_quantity = tier.min_quantity,
            "Inserting manufacturing tier"
        );

        sqlx::query(
            r#"
            INSERT INTO manufacturing_tiers (id, product_id, min_quantity, fee_per_unit, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&tier.id)
        .bind(&tier.product_id)
        .bind(tier.min_quantity)
        .bind(tier.fee_per_unit)
        .bind(tier.created_at)
        .execute(&self.pool)
        .await?;

        Ok(tier.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use purolea_core::{LabelTier, ManufacturingTier, Product, TierTable};

    #[tokio::test]
    async fn test_round_trip_and_resolution() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = db.products().insert(&Product::new("Lotion", 8.0)).await.unwrap();

        let tiers = db.tiers();
        tiers
            .insert_manufacturing_tier(&ManufacturingTier::new(None, 1000, 2.5))
            .await
            .unwrap();
        tiers
            .insert_manufacturing_tier(&ManufacturingTier::new(None, 100, 4.0))
            .await
            .unwrap();
        tiers
            .insert_manufacturing_tier(&ManufacturingTier::new(Some(product.id.clone()), 500, 3.25))
            .await
            .unwrap();

        let loaded = tiers.list_manufacturing_tiers().await.unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].min_quantity, 1000);

        let table = TierTable::new(&loaded);
        assert_eq!(table.fee(Some(&product.id), 600).value(), 3.25);
        assert_eq!(table.fee(Some("someone-else"), 600).value(), 4.0);
    }

    #[tokio::test]
    async fn test_label_tiers() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.tiers()
            .insert_label_tier(&LabelTier::new(None, 100, 0.75))
            .await
            .unwrap();

        let loaded = db.tiers().list_label_tiers().await.unwrap();
        assert_eq!(loaded[0].label_cost, 0.75);
        assert!(db.tiers().list_manufacturing_tiers().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_negative_fee_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db
            .tiers()
            .insert_label_tier(&LabelTier::new(None, 100, -0.1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
