//! # Receipt & Output Sink
//!
//! Checkout produces two human-readable messages, always in this order:
//!
//! ```text
//! ┌───────────────────────────────┐
//! │ ** Shipment notice **         │  only when the cart has shippable lines
//! │ 2x Cheese 0.4kg               │
//! │ Total package weight 3.5kg    │
//! └───────────────┬───────────────┘
//!                 ▼
//! ┌───────────────────────────────┐
//! │ ** Checkout receipt **        │  always
//! │ 2x Cheese $200.00             │
//! │ ----------------------        │
//! │ Subtotal $400.00              │
//! │ Shipping $40.00               │
//! │ Amount $440.00                │
//! │ Your current balance: $560.00 │
//! └───────────────────────────────┘
//! ```
//!
//! Where those messages go is up to the caller's [`OutputSink`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::warn;

use crate::money::Money;
use crate::shipping::ShipmentNotice;

// =============================================================================
// Receipt
// =============================================================================

/// One purchased line on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub quantity: u32,
    pub name: String,
    /// `unit_price × quantity`
    pub line_total: Money,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub shipping: Money,
    /// `subtotal + shipping`
    pub total: Money,
    /// Customer balance after the total was deducted.
    pub remaining_balance: Money,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(f, "{}x {} {}", line.quantity, line.name, line.line_total)?;
        }
        writeln!(f, "----------------------")?;
        writeln!(f, "Subtotal {}", self.subtotal)?;
        writeln!(f, "Shipping {}", self.shipping)?;
        writeln!(f, "Amount {}", self.total)?;
        write!(f, "Your current balance: {}", self.remaining_balance)
    }
}

// =============================================================================
// Output Sink
// =============================================================================

/// Receives checkout output, one logical message per call.
///
/// Delivery is fire-and-forget: a sink has no way to fail a checkout.
pub trait OutputSink {
    fn shipment_notice(&mut self, notice: &ShipmentNotice);
    fn receipt(&mut self, receipt: &Receipt);
}

/// Writes messages as text to any `io::Write` (stdout in the demo).
///
/// Write errors are logged and dropped.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, kind: &'static str, message: &dyn fmt::Display) {
        if let Err(e) = writeln!(self.writer, "{message}").and_then(|_| self.writer.flush()) {
            warn!(kind, error = %e, "Failed to write checkout output");
        }
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn shipment_notice(&mut self, notice: &ShipmentNotice) {
        self.emit("shipment_notice", notice);
    }

    fn receipt(&mut self, receipt: &Receipt) {
        self.emit("receipt", receipt);
    }
}

/// A message captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SinkMessage {
    Shipment(ShipmentNotice),
    Receipt(Receipt),
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Vec<SinkMessage>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[SinkMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<SinkMessage> {
        self.messages
    }
}

impl OutputSink for RecordingSink {
    fn shipment_notice(&mut self, notice: &ShipmentNotice) {
        self.messages.push(SinkMessage::Shipment(notice.clone()));
    }

    fn receipt(&mut self, receipt: &Receipt) {
        self.messages.push(SinkMessage::Receipt(receipt.clone()));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipping::{ShipmentLineItem, ShippingService};

    fn sample_receipt() -> Receipt {
        Receipt {
            lines: vec![
                ReceiptLine {
                    quantity: 2,
                    name: "Cheese".to_string(),
                    line_total: Money::from_major(200),
                },
                ReceiptLine {
                    quantity: 1,
                    name: "TV".to_string(),
                    line_total: Money::from_major(50),
                },
            ],
            subtotal: Money::from_major(250),
            shipping: Money::from_major(30),
            total: Money::from_major(280),
            remaining_balance: Money::from_major(720),
        }
    }

    #[test]
    fn test_receipt_text() {
        assert_eq!(
            sample_receipt().to_string(),
            "** Checkout receipt **\n\
             2x Cheese $200.00\n\
             1x TV $50.00\n\
             ----------------------\n\
             Subtotal $250.00\n\
             Shipping $30.00\n\
             Amount $280.00\n\
             Your current balance: $720.00"
        );
    }

    #[test]
    fn test_writer_sink_writes_each_message_on_its_own_lines() {
        let notice = ShippingService::prepare(vec![ShipmentLineItem {
            name: "TV".to_string(),
            weight_kg: 2.0,
            quantity: 1,
        }]);

        let mut sink = WriterSink::new(Vec::new());
        sink.shipment_notice(&notice);
        sink.receipt(&sample_receipt());

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.starts_with("** Shipment notice **\n1x TV 2.0kg\nTotal package weight 2.0kg\n"));
        assert!(text.contains("\n** Checkout receipt **\n"));
        assert!(text.ends_with("Your current balance: $720.00\n"));
    }

    /// Rejects the first message, accepts everything after it.
    struct FlakyWriter {
        failed_once: bool,
        written: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.failed_once {
                self.failed_once = true;
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_sink_keeps_going_after_io_error() {
        let notice = ShippingService::prepare(vec![ShipmentLineItem {
            name: "TV".to_string(),
            weight_kg: 2.0,
            quantity: 1,
        }]);
        let mut sink = WriterSink::new(FlakyWriter {
            failed_once: false,
            written: Vec::new(),
        });

        sink.shipment_notice(&notice);
        sink.receipt(&sample_receipt());

        let writer = sink.into_inner();
        assert!(writer.failed_once);
        let text = String::from_utf8(writer.written).unwrap();
        assert_eq!(text, format!("{}\n", sample_receipt()));
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let notice = ShippingService::prepare(Vec::new());
        let mut sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.shipment_notice(&notice);
        sink.receipt(&sample_receipt());

        let messages = sink.into_messages();
        assert!(matches!(messages[0], SinkMessage::Shipment(_)));
        assert!(matches!(messages[1], SinkMessage::Receipt(_)));
    }

    #[test]
    fn test_sink_message_json_is_tagged() {
        let json = serde_json::to_value(SinkMessage::Receipt(sample_receipt())).unwrap();
        assert_eq!(json["type"], "receipt");
        assert_eq!(json["total"], 28000);
    }
}
