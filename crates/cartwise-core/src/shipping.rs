//! # Shipping
//!
//! Turns the shippable part of a cart into a shipment notice.
//!
//! ```text
//! Cart::shippables(&catalog)
//!      │  Vec<ShipmentLineItem { name, weight_kg, quantity }>
//!      ▼
//! ShippingService::ship(items, sink)
//!      │  total_weight_kg = Σ weight_kg × quantity
//!      ▼
//! OutputSink::shipment_notice(&ShipmentNotice)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::receipt::OutputSink;

/// Read-only projection of one shippable cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentLineItem {
    pub name: String,
    /// Weight of one unit.
    pub weight_kg: f64,
    pub quantity: u32,
}

impl ShipmentLineItem {
    /// Weight of the whole line (`weight_kg × quantity`).
    #[inline]
    pub fn line_weight_kg(&self) -> f64 {
        self.weight_kg * f64::from(self.quantity)
    }
}

/// What gets handed to the carrier: every shippable line plus the package
/// weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentNotice {
    pub items: Vec<ShipmentLineItem>,
    pub total_weight_kg: f64,
}

impl fmt::Display for ShipmentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Shipment notice **")?;
        // `{:?}` keeps the trailing `.0` on whole weights
        for item in &self.items {
            writeln!(f, "{}x {} {:?}kg", item.quantity, item.name, item.weight_kg)?;
        }
        write!(f, "Total package weight {:.1}kg", self.total_weight_kg)
    }
}

/// Stateless shipping service.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingService;

impl ShippingService {
    /// Builds the shipment notice without reporting it.
    pub fn prepare(items: Vec<ShipmentLineItem>) -> ShipmentNotice {
        let total_weight_kg: f64 = items.iter().map(ShipmentLineItem::line_weight_kg).sum();
        ShipmentNotice {
            items,
            total_weight_kg,
        }
    }

    /// Builds the shipment notice and reports it to `sink`.
    ///
    /// Callers only invoke this with a non-empty list; an empty list still
    /// produces a notice with zero weight.
    pub fn ship(items: Vec<ShipmentLineItem>, sink: &mut dyn OutputSink) -> ShipmentNotice {
        let notice = Self::prepare(items);
        debug!(
            items = notice.items.len(),
            total_weight_kg = notice.total_weight_kg,
            "Shipping items"
        );
        sink.shipment_notice(&notice);
        notice
    }
}
