//! # Domain Types
//!
//! The product record and its capability sub-records.
//!
//! ## Capability Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Product                                      │
//! │  ─────────────────────────────────────────────────────────────────     │
//! │  id (UUID)   name   unit_price (Money)   available_quantity (u32)      │
//! │                                                                         │
//! │  shipping: Option<ShippingInfo>      expiry: Option<ExpiryInfo>        │
//! │            └── weight_kg                     └── expires_on            │
//! │                                                                         │
//! │  shipping │ expiry │ ProductKind                                        │
//! │  ─────────┼────────┼─────────────────────                               │
//! │  None     │ None   │ Plain                (gift card, e-voucher)        │
//! │  Some     │ None   │ Shippable            (TV)                          │
//! │  None     │ Some   │ Expirable            (scratch card)                │
//! │  Some     │ Some   │ ShippableExpirable   (cheese, biscuits)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Callers check capability presence with `Option`s instead of a type
//! hierarchy, so there is no downcasting anywhere in the crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identity of a product inside a [`Catalog`](crate::catalog::Catalog).
///
/// Carts store this id, never a copy of the product, so a stock decrement
/// is visible to every cart that references the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a fresh random id (UUID v4).
    pub fn new() -> Self {
        ProductId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Capabilities
// =============================================================================

/// Present on products that ship physically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShippingInfo {
    /// Weight of a single unit in kilograms. Must be finite and > 0.
    pub weight_kg: f64,
}

/// Present on products with a best-before date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryInfo {
    pub expires_on: NaiveDate,
}

impl ExpiryInfo {
    /// True iff the expiry date is strictly before `reference`.
    ///
    /// A product expiring today is still sellable today.
    #[inline]
    pub fn is_expired(&self, reference: NaiveDate) -> bool {
        self.expires_on < reference
    }
}

/// The four capability combinations a product can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Plain,
    Shippable,
    Expirable,
    ShippableExpirable,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Built with [`Product::new`] plus the consuming `with_*` builders, then
/// handed to the catalog. Capabilities cannot change afterwards; the only
/// mutation is the crate-internal stock decrement run by checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    unit_price: Money,
    available_quantity: u32,
    shipping: Option<ShippingInfo>,
    expiry: Option<ExpiryInfo>,
}

impl Product {
    /// Creates a plain product (no shipping, no expiry).
    pub fn new(name: impl Into<String>, unit_price: Money, available_quantity: u32) -> Self {
        Product {
            id: ProductId::new(),
            name: name.into(),
            unit_price,
            available_quantity,
            shipping: None,
            expiry: None,
        }
    }

    /// Adds the shippable capability.
    pub fn with_shipping(mut self, weight_kg: f64) -> Self {
        self.shipping = Some(ShippingInfo { weight_kg });
        self
    }

    /// Adds the expirable capability.
    pub fn with_expiry(mut self, expires_on: NaiveDate) -> Self {
        self.expiry = Some(ExpiryInfo { expires_on });
        self
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn available_quantity(&self) -> u32 {
        self.available_quantity
    }

    #[inline]
    pub fn shipping(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    #[inline]
    pub fn expiry(&self) -> Option<&ExpiryInfo> {
        self.expiry.as_ref()
    }

    #[inline]
    pub fn is_shippable(&self) -> bool {
        self.shipping.is_some()
    }

    #[inline]
    pub fn has_expiry(&self) -> bool {
        self.expiry.is_some()
    }

    /// Per-unit weight, only for shippable products.
    #[inline]
    pub fn weight_kg(&self) -> Option<f64> {
        self.shipping.map(|s| s.weight_kg)
    }

    /// True iff the product has an expiry date strictly before `reference`.
    /// Products without the expiry capability never expire.
    pub fn is_expired(&self, reference: NaiveDate) -> bool {
        self.expiry
            .map(|e| e.is_expired(reference))
            .unwrap_or(false)
    }

    pub fn kind(&self) -> ProductKind {
        match (self.shipping.is_some(), self.expiry.is_some()) {
            (false, false) => ProductKind::Plain,
            (true, false) => ProductKind::Shippable,
            (false, true) => ProductKind::Expirable,
            (true, true) => ProductKind::ShippableExpirable,
        }
    }

    /// Removes sold units from stock.
    ///
    /// Checkout validates stock for every line before calling this, so the
    /// error branch only guards against misuse inside the crate.
    pub(crate) fn decrement_stock(&mut self, quantity: u32) -> CoreResult<()> {
        self.available_quantity = self
            .available_quantity
            .checked_sub(quantity)
            .ok_or_else(|| CoreError::InsufficientStock {
                product: self.name.clone(),
                available: self.available_quantity,
                requested: quantity,
            })?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
