//! # Quote Repository
//!
//! Quotes are append-only snapshots. There is no update or delete: a
//! changed quote is a new quote.
//!
//! ## Stored Values
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity 500, breakdown per unit 16.00 / 1.50 / 0.65 / 3.00            │
//! │                                                                         │
//! │  formula_cost       8000.00   ← extended (× quantity)                   │
//! │  packaging_cost      750.00   ← extended                                │
//! │  label_cost          325.00   ← extended                                │
//! │  manufacturing_fee  1500.00   ← extended                                │
//! │  total_unit_cost      21.15   ← per unit                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use purolea_core::validation::validate_new_quote;
use purolea_core::{NewQuote, Quote};

const SELECT_QUOTE: &str = r#"
    SELECT id, product_id, product_name, quantity,
           formula_cost, packaging_cost, label_cost, manufacturing_fee, total_unit_cost,
           client_name, client_email, created_by, created_at
    FROM quotes
"#;

/// Repository for saved quotes.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    pool: SqlitePool,
}

impl QuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        QuoteRepository { pool }
    }

    /// Persists a confirmed quote.
    ///
    /// The record is checked again here, so quotes that bypass
    /// `QuoteDraft::confirm` are held to the same rules.
    pub async fn insert(&self, new: NewQuote) -> DbResult<Quote> {
        validate_new_quote(&new)?;

        let quote = Quote::from_new(new);

        debug!(id = %quote.id, quantity = quote.quantity, "Inserting quote");

        sqlx::query(
            r#"
            INSERT INTO quotes (
                id, product_id, product_name, quantity,
                formula_cost, packaging_cost, label_cost, manufacturing_fee, total_unit_cost,
                client_name, client_email, created_by, created_at
            ) VALUES (
                ?1, ?2, ?3, ?4,
                ?5, ?6, ?7, ?8, ?9,
                ?10, ?11, ?12, ?13
            )
            "#,
        )
        .bind(&quote.id)
        .bind(&quote.product_id)
        .bind(&quote.product_name)
        .bind(quote.quantity)
        .bind(quote.formula_cost)
        .bind(quote.packaging_cost)
        .bind(quote.label_cost)
        .bind(quote.manufacturing_fee)
        .bind(quote.total_unit_cost)
        .bind(&quote.client_name)
        .bind(&quote.client_email)
        .bind(&quote.created_by)
        .bind(quote.created_at)
        .execute(&self.pool)
        .await?;

        info!(
            id = %quote.id,
            client = %quote.client_name,
            total = %quote.total_project_cost(),
            "Quote saved"
        );
        Ok(quote)
    }

    /// Lists quotes, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<Quote>> {
        let quotes = sqlx::query_as::<_, Quote>(&format!(
            "{} ORDER BY created_at DESC, rowid DESC LIMIT ?1",
            SELECT_QUOTE
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(quotes)
    }

    /// Gets a quote by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Quote>> {
        let quote = sqlx::query_as::<_, Quote>(&format!("{} WHERE id = ?1", SELECT_QUOTE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(quote)
    }
}
