//! # Validation Module
//!
//! Input validation for catalog registration, cart adds and customer setup.
//!
//! ## Where Each Check Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Catalog::insert ──► validate_product                                  │
//! │                      ├── validate_product_name                         │
//! │                      ├── validate_unit_price                           │
//! │                      └── validate_weight_kg (shippable only)           │
//! │                                                                         │
//! │  Cart::add ────────► validate_quantity                                 │
//! │                                                                         │
//! │  Customer::new ────► validate_customer_name, validate_balance          │
//! │                                                                         │
//! │  Business rules (stock, expiry, balance vs total) are NOT here:        │
//! │  they live in cart.rs / customer.rs and raise CoreError variants.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartwise_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Cheese").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product or customer name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_name("name", name)
}

/// Validates a customer name. Same rules as product names.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_name("customer name", name)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested cart quantity (must be > 0).
///
/// ```rust
/// use cartwise_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a starting customer balance (non-negative).
pub fn validate_balance(balance: Money) -> ValidationResult<()> {
    if balance.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "balance".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a per-unit shipping weight.
///
/// ## Rules
/// - Must be a finite number (no NaN / infinity)
/// - Must be > 0
pub fn validate_weight_kg(weight_kg: f64) -> ValidationResult<()> {
    if !weight_kg.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "weight".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if weight_kg <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "weight".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates everything about a product before it enters the catalog.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(product.name())?;
    validate_unit_price(product.unit_price())?;

    if let Some(weight_kg) = product.weight_kg() {
        validate_weight_kg(weight_kg)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
