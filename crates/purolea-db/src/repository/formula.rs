//! # Formula Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use purolea_core::validation::validate_formula;
use purolea_core::Formula;

/// Repository for formula prices.
#[derive(Debug, Clone)]
pub struct FormulaRepository {
    pool: SqlitePool,
}

impl FormulaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        FormulaRepository { pool }
    }

    /// Lists all formulas in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Formula>> {
        let formulas = sqlx::query_as::<_, Formula>(
            r#"
            SELECT id, product_id, price_per_oz, notes, created_at
            FROM formulas
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(formulas)
    }

    /// Inserts a formula.
    ///
    /// ## Errors
    /// - negative price → `DbError::Validation`
    /// - unknown product id → `DbError::ForeignKeyViolation`
    pub async fn insert(&self, formula: &Formula) -> DbResult<Formula> {
        validate_formula(formula)?;

        debug!(id = %formula.id, product_id = ?formula.product_id, "Inserting formula");

        sqlx::query(
            r#"
            INSERT INTO formulas (id, product_id, price_per_oz, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&formula.id)
        .bind(&formula.product_id)
        .bind(formula.price_per_oz)
        .bind(&formula.notes)
        .bind(formula.created_at)
        .execute(&self.pool)
        .await?;

        Ok(formula.clone())
    }
}
