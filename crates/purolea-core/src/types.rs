//! # Domain Types
//!
//! Catalog records and persisted quotes.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Formula      │   │ PackagingOption │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  product_id?    │   │  product_id?    │──►    │
//! │  │  name           │   │  price_per_oz   │   │  price          │       │
//! │  │  size_oz        │   │  notes?         │   │  supplier?      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   LabelTier     │   │ManufacturingTier│   │     Quote       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id?    │   │  product_id?    │   │  snapshot of a  │       │
//! │  │  min_quantity   │   │  min_quantity   │   │  CostBreakdown  │       │
//! │  │  label_cost     │   │  fee_per_unit   │   │  + client info  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `None` product id marks a generic record that applies to any product.
//! Raw numeric columns are stored as `f64`; accessors hand out [`Amount`]s,
//! which are always finite and non-negative.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Amount;

/// Generates a new record id.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Product
// =============================================================================

/// A product the business can manufacture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Fill volume of one unit, in ounces.
    pub size_oz: f64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with a fresh id.
    pub fn new(name: impl Into<String>, size_oz: f64) -> Self {
        Product {
            id: generate_id(),
            name: name.into(),
            size_oz,
            created_at: Utc::now(),
        }
    }

    /// Returns the unit size.
    #[inline]
    pub fn size(&self) -> Amount {
        Amount::new(self.size_oz)
    }
}

// =============================================================================
// Formula
// =============================================================================

/// A formula price, charged per ounce of fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Formula {
    pub id: String,
    pub product_id: Option<String>,
    pub price_per_oz: f64,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Formula {
    pub fn new(product_id: Option<String>, price_per_oz: f64, notes: Option<String>) -> Self {
        Formula {
            id: generate_id(),
            product_id,
            price_per_oz,
            notes,
            created_at: Utc::now(),
        }
    }

    /// Returns the per-ounce price.
    #[inline]
    pub fn unit_price(&self) -> Amount {
        Amount::new(self.price_per_oz)
    }
}

// =============================================================================
// Packaging Option
// =============================================================================

/// A container option with a flat per-unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackagingOption {
    pub id: String,
    pub product_id: Option<String>,
    pub name: String,
    pub price: f64,
    pub supplier: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl PackagingOption {
    pub fn new(
        product_id: Option<String>,
        name: impl Into<String>,
        price: f64,
        supplier: Option<String>,
    ) -> Self {
        PackagingOption {
            id: generate_id(),
            product_id,
            name: name.into(),
            price,
            supplier,
            created_at: Utc::now(),
        }
    }

    /// Returns the per-unit price.
    #[inline]
    pub fn unit_price(&self) -> Amount {
        Amount::new(self.price)
    }
}

// =============================================================================
// Price Tiers
// =============================================================================

/// Label printing price band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LabelTier {
    pub id: String,
    pub product_id: Option<String>,
    pub min_quantity: u32,
    pub label_cost: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl LabelTier {
    pub fn new(product_id: Option<String>, min_quantity: u32, label_cost: f64) -> Self {
        LabelTier {
            id: generate_id(),
            product_id,
            min_quantity,
            label_cost,
            created_at: Utc::now(),
        }
    }
}

/// Manufacturing fee price band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturingTier {
    pub id: String,
    pub product_id: Option<String>,
    pub min_quantity: u32,
    pub fee_per_unit: f64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl ManufacturingTier {
    pub fn new(product_id: Option<String>, min_quantity: u32, fee_per_unit: f64) -> Self {
        ManufacturingTier {
            id: generate_id(),
            product_id,
            min_quantity,
            fee_per_unit,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

/// What a quote was priced for.
///
/// Quotes normally point at a catalog product. When product data arrives
/// from an out-of-band extraction instead, only its name is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ProductRef {
    /// A product in the Catalog Store.
    Catalog(String),
    /// A product name supplied from outside the catalog.
    External(String),
}

impl ProductRef {
    /// Catalog product id, if any.
    pub fn product_id(&self) -> Option<&str> {
        match self {
            ProductRef::Catalog(id) => Some(id),
            ProductRef::External(_) => None,
        }
    }

    /// Externally supplied product name, if any.
    pub fn product_name(&self) -> Option<&str> {
        match self {
            ProductRef::Catalog(_) => None,
            ProductRef::External(name) => Some(name),
        }
    }
}

/// A confirmed quote ready to be persisted.
///
/// All cost fields except `total_unit_cost` are extended (per-unit × quantity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewQuote {
    pub product: ProductRef,
    pub quantity: u32,
    pub formula_cost: f64,
    pub packaging_cost: f64,
    pub label_cost: f64,
    pub manufacturing_fee: f64,
    pub total_unit_cost: f64,
    pub client_name: String,
    pub client_email: String,
    pub created_by: Option<String>,
}

/// A persisted quote. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: u32,
    pub formula_cost: f64,
    pub packaging_cost: f64,
    pub label_cost: f64,
    pub manufacturing_fee: f64,
    pub total_unit_cost: f64,
    pub client_name: String,
    pub client_email: String,
    pub created_by: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Assigns an id and creation time to a confirmed quote.
    pub fn from_new(new: NewQuote) -> Self {
        Quote {
            id: generate_id(),
            product_id: new.product.product_id().map(str::to_string),
            product_name: new.product.product_name().map(str::to_string),
            quantity: new.quantity,
            formula_cost: new.formula_cost,
            packaging_cost: new.packaging_cost,
            label_cost: new.label_cost,
            manufacturing_fee: new.manufacturing_fee,
            total_unit_cost: new.total_unit_cost,
            client_name: new.client_name,
            client_email: new.client_email,
            created_by: new.created_by,
            created_at: Utc::now(),
        }
    }

    /// Total for the whole production run.
    pub fn total_project_cost(&self) -> Amount {
        Amount::new(self.total_unit_cost).times(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
