//! # purolea-core: Pure Pricing Logic for Purolea Quote
//!
//! This crate is the **heart** of the quoting tool. It turns a product, its
//! cost inputs and a quantity into a deterministic cost breakdown, with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Purolea Quote Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    purolea-cli (thin app)                       │   │
//! │  │    products ──► price ──► save ──► export                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ purolea-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │   tier   │  │ pricing  │  │ session  │  │   document   │   │   │
//! │  │   │ resolve  │─►│ aggregate│◄─│QuoteDraft│─►│ QuoteDocument│   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                purolea-db (Catalog Store)                       │   │
//! │  │         SQLite queries, migrations, repositories                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Product, Formula, tiers, Quote)
//! - [`catalog`] - Materialized catalog snapshot handed to the engine
//! - [`money`] - `Amount` type with lenient parsing and currency display
//! - [`tier`] - Tier resolution and the fallback schedules
//! - [`pricing`] - Cost aggregation into a [`CostBreakdown`]
//! - [`projection`] - Human-readable price bands
//! - [`session`] - Editable quote draft and confirmation
//! - [`document`] - Exportable quote document and text exporter
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for catalog writes and quotes
//!
//! ## Example Usage
//!
//! ```rust
//! use purolea_core::pricing::{aggregate, CostInputs, Sourcing};
//!
//! let inputs = CostInputs::new(2.00, 8.0, 1.50)
//!     .packaging(Sourcing::InHouse)
//!     .labels(Sourcing::InHouse);
//!
//! // Label and manufacturing fees already resolved from their tier tables
//! let breakdown = aggregate(&inputs, 500, 0.65, 3.00);
//! assert!((breakdown.total_unit_cost.value() - 21.15).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod document;
pub mod error;
pub mod money;
pub mod pricing;
pub mod projection;
pub mod session;
pub mod tier;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::CatalogSnapshot;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Amount;
pub use pricing::{CostBreakdown, CostInputs, PricingEngine, Sourcing};
pub use session::QuoteDraft;
pub use tier::{Tier, TierResolution, TierTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantities quoted side by side in exported documents.
pub const REFERENCE_QUANTITIES: [u32; 3] = [100, 500, 1000];

/// Quantity a fresh draft starts with.
pub const DEFAULT_QUANTITY: u32 = 100;

/// Largest production run a single quote may cover.
///
/// ## Business Reason
/// Catches typos such as an extra zero before a quote is saved.
pub const MAX_QUOTE_QUANTITY: u32 = 1_000_000;
