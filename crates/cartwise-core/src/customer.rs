//! # Customer & Checkout
//!
//! A customer owns a balance and exactly one cart. Checkout validates the
//! cart, reports the shipment and receipt, then commits.
//!
//! ## Checkout Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Building ──checkout()──► Checkout ──────────────────────► Building     │
//! │                              │                         (cart cleared)  │
//! │                              │ any check fails                         │
//! │                              └─────────► Building (nothing changed)    │
//! │                                                                         │
//! │  Validate (short-circuit, no mutation)                                  │
//! │   1. cart empty?                  → EmptyCart                          │
//! │   2. line qty > stock?            → OutOfStock                         │
//! │   3. product expired (today)?     → ExpiredItem                        │
//! │   4. subtotal + shipping = total  → AmountOverflow                     │
//! │   5. balance < total?             → InsufficientBalance                │
//! │                                                                         │
//! │  Report                                                                 │
//! │   6. shipment notice (only if something ships)                         │
//! │   7. receipt                                                           │
//! │                                                                         │
//! │  Commit                                                                 │
//! │   8. decrement stock; balance -= total; clear cart                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is borrowed mutably for the whole call, so nothing else can
//! change stock between the checks and the commit.

use tracing::{info, info_span, warn};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::config::CheckoutConfig;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::receipt::{OutputSink, Receipt};
use crate::shipping::ShippingService;
use crate::types::ProductId;
use crate::validation::{validate_balance, validate_customer_name};

/// A shopper with a balance and a cart.
#[derive(Debug, Clone)]
pub struct Customer {
    name: String,
    balance: Money,
    cart: Cart,
}

impl Customer {
    /// Creates a customer with an empty cart and the default shipping rate.
    ///
    /// ## Errors
    /// - `ValidationError::Required` for an empty name
    /// - `ValidationError::OutOfRange` for a negative balance
    pub fn new(name: impl Into<String>, balance: Money) -> CoreResult<Self> {
        Self::with_config(name, balance, &CheckoutConfig::default())
    }

    /// Same as [`Customer::new`] with an explicit checkout configuration.
    pub fn with_config(
        name: impl Into<String>,
        balance: Money,
        config: &CheckoutConfig,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_customer_name(&name)?;
        validate_balance(balance)?;

        Ok(Customer {
            name,
            balance,
            cart: Cart::with_config(config),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds a product to this customer's cart. See [`Cart::add`].
    pub fn add_to_cart(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        quantity: u32,
    ) -> CoreResult<()> {
        self.cart.add(catalog, product_id, quantity)
    }

    /// Empties the cart without checking out.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Runs the checkout pipeline.
    ///
    /// On success the shipment notice (if any) and the receipt have been sent
    /// to `sink`, the balance is reduced by the total, catalog stock is
    /// decremented and the cart is empty. On error none of that happened and
    /// nothing was sent to `sink`.
    pub fn checkout(
        &mut self,
        catalog: &mut Catalog,
        clock: &dyn Clock,
        sink: &mut dyn OutputSink,
    ) -> CoreResult<Receipt> {
        let span = info_span!("checkout", customer = %self.name);
        let _guard = span.enter();

        match self.settle(catalog, clock, sink) {
            Ok(receipt) => {
                info!(
                    total = %receipt.total,
                    remaining_balance = %receipt.remaining_balance,
                    "Checkout completed"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "Checkout rejected");
                Err(e)
            }
        }
    }

    fn settle(
        &mut self,
        catalog: &mut Catalog,
        clock: &dyn Clock,
        sink: &mut dyn OutputSink,
    ) -> CoreResult<Receipt> {
        // 1.
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        // 2.
        if let Some((line, product)) = self.cart.first_out_of_stock(catalog)? {
            return Err(CoreError::OutOfStock {
                product: product.name().to_string(),
                available: product.available_quantity(),
                requested: line.quantity,
            });
        }

        // 3. One date for every line.
        let today = clock.today();
        if let Some(product) = self.cart.first_expired(catalog, today)? {
            return Err(CoreError::ExpiredItem {
                product: product.name().to_string(),
                expired_on: product
                    .expiry()
                    .map_or(today, |expiry| expiry.expires_on),
            });
        }

        // 4.
        let subtotal = self.cart.subtotal(catalog)?;
        let shipping = self.cart.shipping_fee()?;
        let total = subtotal
            .checked_add(shipping)
            .ok_or_else(|| CoreError::amount_overflow("total"))?;

        // 5.
        if self.balance < total {
            return Err(CoreError::InsufficientBalance {
                balance: self.balance,
                total,
            });
        }

        let remaining_balance = self
            .balance
            .checked_sub(total)
            .ok_or_else(|| CoreError::amount_overflow("remaining balance"))?;
        let shippables = self.cart.shippables(catalog)?;
        let receipt = Receipt {
            lines: self.cart.receipt_lines(catalog)?,
            subtotal,
            shipping,
            total,
            remaining_balance,
        };

        // 6.
        if !shippables.is_empty() {
            ShippingService::ship(shippables, sink);
        }

        // 7.
        sink.receipt(&receipt);

        // 8. Stock first: it is the only fallible step.
        self.cart.decrement_stock(catalog)?;
        self.balance = receipt.remaining_balance;
        self.cart.clear();

        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
