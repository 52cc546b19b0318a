//! # purolea-db: Catalog Store for Purolea Quote
//!
//! Persistence for products, formulas, packaging, pricing tiers and saved
//! quotes. SQLite through sqlx, plus an in-memory store with the same rules.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Purolea Quote Data Flow                           │
//! │                                                                         │
//! │  CLI command (price, save, export ...)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   purolea-db (THIS CRATE)                       │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────────┐   ┌────────────────┐   ┌────────────────┐    │    │
//! │  │   │ CatalogStore │   │  Repositories  │   │   Migrations   │    │    │
//! │  │   │  (store.rs)  │──►│ product.rs     │   │   (embedded)   │    │    │
//! │  │   │              │   │ formula.rs     │   │                │    │    │
//! │  │   │ Database     │   │ packaging.rs   │   │ 001_initial_   │    │    │
//! │  │   │ MemoryStore  │   │ tier.rs        │   │   schema.sql   │    │    │
//! │  │   │              │   │ quote.rs       │   │                │    │    │
//! │  │   └──────────────┘   └────────────────┘   └────────────────┘    │    │
//! │  │                                                                 │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                     SQLite Database                             │    │
//! │  │   ./purolea.db (PUROLEA_DB_PATH)                                │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Per-table repositories
//! - [`store`] - The `CatalogStore` trait and its two implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use purolea_db::{CatalogStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./purolea.db")).await?;
//! let catalog = db.load_catalog().await?;
//! let quotes = db.list_quotes(20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{CatalogStore, MemoryStore, DEFAULT_QUOTE_LIMIT};

// Repository re-exports for convenience
pub use repository::formula::FormulaRepository;
pub use repository::packaging::PackagingRepository;
pub use repository::product::ProductRepository;
pub use repository::quote::QuoteRepository;
pub use repository::tier::TierRepository;
