//! # Cartwise Demo Entry Point
//!
//! Runs one checkout against a three-product catalog.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Load checkout config (`CARTWISE_SHIPPING_RATE_CENTS`)
//! 3. Register products in the catalog
//! 4. Fill the customer's cart
//! 5. Check out, writing the shipment notice and receipt to stdout
//!
//! ```bash
//! cargo run -p cartwise-demo
//! RUST_LOG=debug CARTWISE_SHIPPING_RATE_CENTS=500 cargo run -p cartwise-demo
//! ```

use std::io;

use cartwise_core::{
    Catalog, CheckoutConfig, Clock, Customer, Money, Product, SystemClock, WriterSink,
};
use chrono::Days;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = CheckoutConfig::from_env();
    info!(shipping_rate = %config.shipping_rate_per_unit, "Starting Cartwise demo");

    let clock = SystemClock;
    let today = clock.today();

    let mut catalog = Catalog::new();
    let cheese = catalog.insert(
        Product::new("Cheese", Money::from_major(100), 10)
            .with_expiry(today + Days::new(3))
            .with_shipping(0.4),
    )?;
    let biscuits = catalog.insert(
        Product::new("Biscuits", Money::from_major(150), 5)
            .with_expiry(today + Days::new(2))
            .with_shipping(0.7),
    )?;
    let tv = catalog.insert(Product::new("TV", Money::from_major(50), 20).with_shipping(2.0))?;

    let mut customer = Customer::with_config("Amr", Money::from_major(1000), &config)?;
    customer.add_to_cart(&catalog, cheese, 2)?;
    customer.add_to_cart(&catalog, biscuits, 1)?;
    customer.add_to_cart(&catalog, tv, 1)?;

    let mut sink = WriterSink::new(io::stdout().lock());
    if let Err(e) = customer.checkout(&mut catalog, &clock, &mut sink) {
        error!(error = %e, "Checkout failed");
        return Err(e.into());
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=cartwise_core=trace` - Trace for the core crate only
/// - Default: INFO, DEBUG for cartwise crates
///
/// Logs go to stderr so stdout carries only the notice and receipt.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cartwise_core=debug,cartwise_demo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
