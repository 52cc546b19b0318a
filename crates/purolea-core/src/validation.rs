//! # Validation Module
//!
//! Input validation for catalog writes and quote confirmation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Pricing (pricing, tier)                                       │
//! │  └── Never rejects: bad numbers collapse to $0.00                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Writes (THIS MODULE)                                          │
//! │  ├── Confirming a QuoteDraft: client name, client email, quantity       │
//! │  └── Creating catalog records: names, sizes, prices                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                               │
//! │  └── CHECK constraints on prices and quantities                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use purolea_core::validation::{validate_client_email, validate_quantity};
//!
//! validate_client_email("buyer@acme.com").unwrap();
//! validate_quantity(500).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{
    Formula, LabelTier, ManufacturingTier, NewQuote, PackagingOption, Product, ProductRef,
};
use crate::MAX_QUOTE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product or packaging name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use purolea_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Body Lotion").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, 200)
}

/// Validates the client name on a quote.
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    validate_text("client name", name, 200)
}

/// Validates the client email on a quote.
///
/// ## Rules
/// ```text
///   local@domain.tld
///   ─────┬───────────
///        ├── local part: one or more chars, no whitespace, no '@'
///        ├── exactly one '@'
///        └── domain: no whitespace, contains a '.' with text on both sides
/// ```
///
/// ## Example
/// ```rust
/// use purolea_core::validation::validate_client_email;
///
/// assert!(validate_client_email("buyer@acme.com").is_ok());
/// assert!(validate_client_email("buyer@acme").is_err());
/// assert!(validate_client_email("a b@acme.com").is_err());
/// ```
pub fn validate_client_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "client email".to_string(),
        });
    }

    if is_plausible_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat {
            field: "client email".to_string(),
            reason: "must look like name@example.com".to_string(),
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Some '.' must have at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a production quantity before a quote is saved.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_QUOTE_QUANTITY`]
///
/// Pricing accepts any quantity, including zero. Only saving is strict.
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_QUOTE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_QUOTE_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a product size in ounces: finite and positive.
pub fn validate_size(size_oz: f64) -> ValidationResult<()> {
    if !size_oz.is_finite() || size_oz <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "size".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog price or fee: finite and zero or more.
///
/// ## Example
/// ```rust
/// use purolea_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price("price", 0.0).is_ok());
/// assert!(validate_unit_price("price", 0.035).is_ok());
/// assert!(validate_unit_price("price", -1.0).is_err());
/// ```
pub fn validate_unit_price(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================
//
// One per record kind, shared by every Catalog Store implementation.

fn validate_product_link(product_id: Option<&str>) -> ValidationResult<()> {
    product_id.map_or(Ok(()), validate_uuid)
}

pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_size(product.size_oz)
}

pub fn validate_formula(formula: &Formula) -> ValidationResult<()> {
    validate_unit_price("price per oz", formula.price_per_oz)?;
    validate_product_link(formula.product_id.as_deref())
}

pub fn validate_packaging_option(option: &PackagingOption) -> ValidationResult<()> {
    validate_product_name(&option.name)?;
    validate_unit_price("price", option.price)?;
    validate_product_link(option.product_id.as_deref())
}

pub fn validate_label_tier(tier: &LabelTier) -> ValidationResult<()> {
    validate_unit_price("label cost", tier.label_cost)?;
    validate_product_link(tier.product_id.as_deref())
}

pub fn validate_manufacturing_tier(tier: &ManufacturingTier) -> ValidationResult<()> {
    validate_unit_price("fee per unit", tier.fee_per_unit)?;
    validate_product_link(tier.product_id.as_deref())
}

/// Checks a quote record before it is persisted.
pub fn validate_new_quote(quote: &NewQuote) -> ValidationResult<()> {
    validate_client_name(&quote.client_name)?;
    validate_client_email(&quote.client_email)?;
    validate_quantity(quote.quantity)?;

    for (field, value) in [
        ("formula cost", quote.formula_cost),
        ("packaging cost", quote.packaging_cost),
        ("label cost", quote.label_cost),
        ("manufacturing fee", quote.manufacturing_fee),
        ("total unit cost", quote.total_unit_cost),
    ] {
        validate_unit_price(field, value)?;
    }

    match &quote.product {
        ProductRef::Catalog(id) => validate_uuid(id),
        ProductRef::External(name) => validate_product_name(name),
    }
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a record id.
///
/// ## Example
/// ```rust
/// use purolea_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
