//! # Cart
//!
//! An ordered list of `(product id, quantity)` lines plus a running count of
//! shippable units.
//!
//! ## Two-Tier Stock Check
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cheese: available 10                                                   │
//! │                                                                         │
//! │  add(cheese, 6)   6 <= 10  ✅  line: Cheese × 6                          │
//! │  add(cheese, 6)   6 <= 10  ✅  line: Cheese × 12  (merged, not checked)  │
//! │                                                                         │
//! │  checkout()       has_out_of_stock_items: 12 > 10  ❌ OutOfStock         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! `add` compares the single request with current stock. The merged total
//! is only compared at checkout.
//!
//! ## Invariants
//! - At most one line per product id; insertion order is kept for receipts
//! - Every line quantity is > 0
//! - `shippable_units` == Σ quantity over lines whose product ships

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::CheckoutConfig;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::receipt::ReceiptLine;
use crate::shipping::ShipmentLineItem;
use crate::types::{Product, ProductId};
use crate::validation::validate_quantity;

/// One line in the cart. Refers to the product, never copies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// The shopping cart.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<CartLineItem>,
    shippable_units: u32,
    shipping_rate_per_unit: Money,
}

impl Default for Cart {
    fn default() -> Self {
        Cart::with_config(&CheckoutConfig::default())
    }
}

impl Cart {
    /// Creates an empty cart with the default shipping rate.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &CheckoutConfig) -> Self {
        Cart {
            items: Vec::new(),
            shippable_units: 0,
            shipping_rate_per_unit: config.shipping_rate_per_unit,
        }
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Adds `quantity` units of a product, merging with an existing line.
    ///
    /// ## Errors
    /// - `ValidationError::MustBePositive` for a zero quantity
    /// - `CoreError::ProductNotFound` if the id is not in `catalog`
    /// - `CoreError::InsufficientStock` if `quantity` alone exceeds the
    ///   product's current stock
    ///
    /// The cart is unchanged on error.
    pub fn add(&mut self, catalog: &Catalog, product_id: ProductId, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let product = catalog.get(product_id)?;

        if quantity > product.available_quantity() {
            return Err(CoreError::InsufficientStock {
                product: product.name().to_string(),
                available: product.available_quantity(),
                requested: quantity,
            });
        }

        let overflow = || ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        };

        // Compute everything before touching state so a failure leaves the cart as-is.
        let shippable_units = if product.is_shippable() {
            self.shippable_units.checked_add(quantity).ok_or_else(overflow)?
        } else {
            self.shippable_units
        };

        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(quantity).ok_or_else(overflow)?;
                debug!(product = product.name(), added = quantity, line_quantity = line.quantity, "Merged cart line");
            }
            None => {
                self.items.push(CartLineItem { product_id, quantity });
                debug!(product = product.name(), quantity, "Added cart line");
            }
        }

        self.shippable_units = shippable_units;
        Ok(())
    }

    /// Removes every line and resets the shippable-unit counter.
    pub fn clear(&mut self) {
        self.items.clear();
        self.shippable_units = 0;
    }

    /// Subtracts every line's quantity from catalog stock.
    ///
    /// All or nothing: every line is checked against stock first, and on
    /// `InsufficientStock` no product has been touched.
    pub(crate) fn decrement_stock(&self, catalog: &mut Catalog) -> CoreResult<()> {
        if let Some((line, product)) = self.first_out_of_stock(catalog)? {
            return Err(CoreError::InsufficientStock {
                product: product.name().to_string(),
                available: product.available_quantity(),
                requested: line.quantity,
            });
        }
        for line in &self.items {
            catalog.get_mut(line.product_id)?.decrement_stock(line.quantity)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity currently in the cart for a product (0 if absent).
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Running count of shippable units.
    pub fn shippable_units(&self) -> u32 {
        self.shippable_units
    }

    pub fn shipping_rate_per_unit(&self) -> Money {
        self.shipping_rate_per_unit
    }

    /// Recomputes the shippable-unit count from the lines.
    ///
    /// Always equal to [`Cart::shippable_units`]; kept for consistency checks.
    pub fn recount_shippable_units(&self, catalog: &Catalog) -> CoreResult<u32> {
        let mut units = 0u32;
        for (line, product) in self.lines(catalog) {
            if product?.is_shippable() {
                units += line.quantity;
            }
        }
        Ok(units)
    }

    /// Σ `unit_price × quantity` over all lines.
    ///
    /// Fails with `CoreError::AmountOverflow` if a line total or the sum does
    /// not fit in `i64` cents.
    pub fn subtotal(&self, catalog: &Catalog) -> CoreResult<Money> {
        let mut subtotal = Money::zero();
        for (line, product) in self.lines(catalog) {
            let line_total = line_total(product?, line.quantity)?;
            subtotal = subtotal
                .checked_add(line_total)
                .ok_or_else(|| CoreError::amount_overflow("subtotal"))?;
        }
        Ok(subtotal)
    }

    /// `shippable_units × shipping_rate_per_unit`.
    pub fn shipping_fee(&self) -> CoreResult<Money> {
        self.shipping_rate_per_unit
            .checked_multiply_quantity(self.shippable_units)
            .ok_or_else(|| CoreError::amount_overflow("shipping fee"))
    }

    /// True iff some line's product has expired before `today`.
    pub fn has_expired_items(&self, catalog: &Catalog, today: NaiveDate) -> CoreResult<bool> {
        Ok(self.first_expired(catalog, today)?.is_some())
    }

    /// True iff some line asks for more units than the product has in stock.
    pub fn has_out_of_stock_items(&self, catalog: &Catalog) -> CoreResult<bool> {
        Ok(self.first_out_of_stock(catalog)?.is_some())
    }

    /// Shipment projection of every shippable line, in cart order.
    ///
    /// Derived on each call from the current lines.
    pub fn shippables(&self, catalog: &Catalog) -> CoreResult<Vec<ShipmentLineItem>> {
        let mut shippables = Vec::new();
        for (line, product) in self.lines(catalog) {
            let product = product?;
            if let Some(weight_kg) = product.weight_kg() {
                shippables.push(ShipmentLineItem {
                    name: product.name().to_string(),
                    weight_kg,
                    quantity: line.quantity,
                });
            }
        }
        Ok(shippables)
    }

    /// Receipt lines in cart order.
    pub fn receipt_lines(&self, catalog: &Catalog) -> CoreResult<Vec<ReceiptLine>> {
        self.lines(catalog)
            .map(|(line, product)| {
                let product = product?;
                Ok(ReceiptLine {
                    quantity: line.quantity,
                    name: product.name().to_string(),
                    line_total: line_total(product, line.quantity)?,
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn lines<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> impl Iterator<Item = (&'a CartLineItem, CoreResult<&'a Product>)> + 'a {
        self.items
            .iter()
            .map(move |line| (line, catalog.get(line.product_id)))
    }

    pub(crate) fn first_out_of_stock<'a>(
        &'a self,
        catalog: &'a Catalog,
    ) -> CoreResult<Option<(&'a CartLineItem, &'a Product)>> {
        for (line, product) in self.lines(catalog) {
            let product = product?;
            if line.quantity > product.available_quantity() {
                return Ok(Some((line, product)));
            }
        }
        Ok(None)
    }

    pub(crate) fn first_expired<'a>(
        &'a self,
        catalog: &'a Catalog,
        today: NaiveDate,
    ) -> CoreResult<Option<&'a Product>> {
        for (_, product) in self.lines(catalog) {
            let product = product?;
            if product.is_expired(today) {
                return Ok(Some(product));
            }
        }
        Ok(None)
    }
}

fn line_total(product: &Product, quantity: u32) -> CoreResult<Money> {
    product
        .unit_price()
        .checked_multiply_quantity(quantity)
        .ok_or_else(|| CoreError::amount_overflow("line total"))
}

// =============================================================================
// Unit Tests
// =============================================================================
