//! # Error Types
//!
//! Domain-specific error types for cartwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartwise-core errors (this file)                                      │
//! │  ├── CoreError        - Cart / checkout rejections                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller of add_to_cart / checkout  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every error rejects the current operation only; nothing is retried

use chrono::NaiveDate;
use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. None of them are fatal:
/// the cart, balance and stock are left exactly as they were before the
/// rejected call.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not registered in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Requested quantity exceeds current stock at add time.
    ///
    /// ## When This Occurs
    /// ```text
    /// add_to_cart(cheese, 12)
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Cheese", available: 10, requested: 12 }
    /// ```
    ///
    /// Only the single request is compared with stock. Quantities already
    /// sitting in the cart are checked at checkout (see [`CoreError::OutOfStock`]).
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },

    /// Checkout attempted with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// A merged line item asks for more than the product has in stock.
    #[error("Out of stock item in cart: {product} (available {available}, in cart {requested})")]
    OutOfStock {
        product: String,
        available: u32,
        requested: u32,
    },

    /// A line item's product expired before the checkout date.
    #[error("Cart contains expired item: {product} (expired on {expired_on})")]
    ExpiredItem {
        product: String,
        expired_on: NaiveDate,
    },

    /// Customer balance does not cover subtotal + shipping.
    #[error("Insufficient balance: balance {balance}, total {total}")]
    InsufficientBalance { balance: Money, total: Money },

    /// A computed amount (line total, subtotal, shipping fee, total) does not
    /// fit in `i64` cents.
    #[error("Amount overflow while computing {what}")]
    AmountOverflow { what: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn amount_overflow(what: &str) -> Self {
        CoreError::AmountOverflow {
            what: what.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-finite weight, malformed config).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., product registered twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "Cheese".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Cheese: available 3, requested 5"
        );

        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");

        let err = CoreError::AmountOverflow {
            what: "subtotal".to_string(),
        };
        assert_eq!(err.to_string(), "Amount overflow while computing subtotal");
    }

    #[test]
    fn test_balance_error_uses_money_display() {
        let err = CoreError::InsufficientBalance {
            balance: Money::from_major(100),
            total: Money::from_major(490),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: balance $100.00, total $490.00"
        );
    }

    #[test]
    fn test_expired_error_message() {
        let err = CoreError::ExpiredItem {
            product: "Milk".to_string(),
            expired_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Cart contains expired item: Milk (expired on 2024-03-01)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
