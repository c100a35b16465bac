//! # cartwise-core: Pure Checkout Logic for Cartwise
//!
//! This crate holds the cart and checkout rules: stock and expiry checks,
//! subtotal and shipping fees, balance settlement. It has no I/O of its own;
//! the date comes from a [`Clock`] and output goes to an [`OutputSink`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cartwise Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/demo (cartwise-demo)                      │   │
//! │  │    tracing subscriber • catalog bootstrap • stdout sink        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ cartwise-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │ customer  │  │ shipping  │  │   │
//! │  │   │  Product  │  │ CartLine  │  │ checkout  │  │  notice   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   money • receipt • clock • config • validation • error       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product record and its shipping / expiry capabilities
//! - [`catalog`] - Owner of every product
//! - [`cart`] - Cart lines, fees and stock / expiry checks
//! - [`customer`] - Balance, cart ownership and the checkout pipeline
//! - [`shipping`] - Shipment projection and weight totals
//! - [`receipt`] - Receipt type and output sinks
//! - [`money`] - Integer money
//! - [`clock`] - Date source for expiry checks
//! - [`config`] - Shipping rate configuration
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cartwise_core::{Catalog, Customer, FixedClock, Money, Product, RecordingSink};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//!
//! let mut catalog = Catalog::new();
//! let tv = catalog
//!     .insert(Product::new("TV", Money::from_major(50), 20).with_shipping(2.0))
//!     .unwrap();
//!
//! let mut customer = Customer::new("Amr", Money::from_major(1000)).unwrap();
//! customer.add_to_cart(&catalog, tv, 1).unwrap();
//!
//! let mut sink = RecordingSink::new();
//! let receipt = customer
//!     .checkout(&mut catalog, &FixedClock(today), &mut sink)
//!     .unwrap();
//!
//! // 50 + 10 shipping
//! assert_eq!(receipt.total, Money::from_major(60));
//! assert_eq!(catalog.get(tv).unwrap().available_quantity(), 19);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod customer;
pub mod error;
pub mod money;
pub mod receipt;
pub mod shipping;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem};
pub use catalog::Catalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CheckoutConfig;
pub use customer::Customer;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{OutputSink, Receipt, ReceiptLine, RecordingSink, SinkMessage, WriterSink};
pub use shipping::{ShipmentLineItem, ShipmentNotice, ShippingService};
pub use types::*;
