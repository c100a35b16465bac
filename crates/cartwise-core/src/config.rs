//! # Checkout Configuration
//!
//! Tunables for the checkout pipeline.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CARTWISE_*`) via [`CheckoutConfig::from_env`]
//! 2. JSON document via [`CheckoutConfig::from_json_str`]
//! 3. Defaults (this file)
//!
//! ```json
//! { "shipping_rate_per_unit": 1000 }
//! ```
//!
//! Amounts are in cents, like every other [`Money`] on the wire.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;

/// Environment variable overriding the per-unit shipping rate, in cents.
pub const SHIPPING_RATE_ENV: &str = "CARTWISE_SHIPPING_RATE_CENTS";

/// Flat fee charged for each shippable unit when nothing else is configured.
pub const DEFAULT_SHIPPING_RATE_PER_UNIT: Money = Money::from_major(10);

/// Checkout configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Fee charged per shippable unit in the cart.
    pub shipping_rate_per_unit: Money,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            shipping_rate_per_unit: DEFAULT_SHIPPING_RATE_PER_UNIT,
        }
    }
}

impl CheckoutConfig {
    /// Builds a config with an explicit shipping rate.
    pub fn with_shipping_rate(shipping_rate_per_unit: Money) -> Self {
        CheckoutConfig {
            shipping_rate_per_unit,
        }
    }

    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CARTWISE_SHIPPING_RATE_CENTS`: per-unit shipping rate in cents
    ///
    /// Unparsable or negative values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = CheckoutConfig::default();

        if let Some(raw) = lookup(SHIPPING_RATE_ENV) {
            match raw.trim().parse::<i64>() {
                Ok(cents) if cents >= 0 => {
                    config.shipping_rate_per_unit = Money::from_cents(cents);
                }
                _ => warn!(
                    var = SHIPPING_RATE_ENV,
                    value = %raw,
                    "Ignoring invalid shipping rate override"
                ),
            }
        }

        config
    }

    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let config: CheckoutConfig =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidFormat {
                field: "config".to_string(),
                reason: e.to_string(),
            })?;

        if config.shipping_rate_per_unit.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "shipping_rate_per_unit".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }

        Ok(config)
    }
}
