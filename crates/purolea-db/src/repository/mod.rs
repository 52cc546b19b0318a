//! # Repository Module
//!
//! One repository per table group. Each holds a clone of the pool.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Database::products()   → ProductRepository    (products)               │
//! │  Database::formulas()   → FormulaRepository    (formulas)               │
//! │  Database::packaging()  → PackagingRepository  (packaging_options)      │
//! │  Database::tiers()      → TierRepository       (label_tiers,            │
//! │                                                 manufacturing_tiers)    │
//! │  Database::quotes()     → QuoteRepository      (quotes)                 │
//! │                                                                         │
//! │  Every insert runs the purolea-core record validator first, so a row    │
//! │  that violates a field rule never reaches SQL.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers that should work against either storage backend use
//! [`crate::CatalogStore`] instead of these types directly.

pub mod formula;
pub mod packaging;
pub mod product;
pub mod quote;
pub mod tier;
