//! Transport Seams
//!
//! The platform send primitive and the third-party multipart (MMS) helper,
//! abstracted behind async traits. The SMS primitive is handed the outbox
//! row's locator as a delivery receipt; once the platform learns the
//! outcome it emits a [`DeliveryReport`] carrying that receipt and a
//! result code, which the repository maps back onto the row.
//!
//! Wire encoding and radio access live entirely behind these traits; this
//! crate never touches them.

use crate::error::Result;
use crate::provider::MessageLocator;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tracing::debug;

/// Platform result code for a successful send.
pub const RESULT_OK: i32 = -1;

/// Asynchronous delivery outcome for one sent message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// The outbox row the send was keyed by
    pub receipt: MessageLocator,
    /// Platform result code; [`RESULT_OK`] means delivered to the network
    pub code: i32,
}

impl DeliveryReport {
    pub fn ok(receipt: MessageLocator) -> Self {
        Self { receipt, code: RESULT_OK }
    }

    pub fn failed(receipt: MessageLocator, code: i32) -> Self {
        Self { receipt, code }
    }

    pub fn is_ok(&self) -> bool {
        self.code == RESULT_OK
    }
}

/// One media buffer of an outgoing multipart message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPart {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// The platform text-message send primitive.
#[async_trait]
pub trait SmsTransport: Send + Sync {
    /// Hand a message to the platform for transmission. The receipt keys
    /// the delivery report the platform emits once the outcome is known.
    /// An `Err` means the hand-off itself failed; the outbox row stays in
    /// its sending state.
    async fn send_text(&self, address: &str, body: &str, receipt: MessageLocator) -> Result<()>;
}

/// The third-party multipart transaction helper.
#[async_trait]
pub trait MmsTransport: Send + Sync {
    /// Encode and transmit a multipart message. Opaque to this crate; an
    /// `Err` means the whole transaction failed.
    async fn send_multipart(&self, address: &str, body: &str, media: Vec<MediaPart>) -> Result<()>;
}

/// Record of one send accepted by the [`LoopbackTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentRecord {
    pub address: String,
    pub body: String,
    pub media: Vec<MediaPart>,
}

/// In-process transport that records every send and immediately emits a
/// delivery report with a configured result code. Backs the CLI's
/// simulated sends and the repository tests.
pub struct LoopbackTransport {
    reports: mpsc::UnboundedSender<DeliveryReport>,
    outcome: i32,
    sent: Mutex<Vec<SentRecord>>,
}

impl LoopbackTransport {
    /// A transport whose sends all succeed, plus the report receiver to
    /// drain.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeliveryReport>) {
        Self::with_outcome(RESULT_OK)
    }

    /// A transport that reports the given result code for every send.
    pub fn with_outcome(outcome: i32) -> (Self, mpsc::UnboundedReceiver<DeliveryReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self { reports: tx, outcome, sent: Mutex::new(Vec::new()) },
            rx,
        )
    }

    /// Everything this transport has accepted, in order.
    pub async fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl SmsTransport for LoopbackTransport {
    async fn send_text(&self, address: &str, body: &str, receipt: MessageLocator) -> Result<()> {
        debug!("Loopback accepting text for {} ({})", address, receipt);
        self.sent.lock().await.push(SentRecord {
            address: address.to_string(),
            body: body.to_string(),
            media: Vec::new(),
        });
        let report = DeliveryReport { receipt, code: self.outcome };
        // Receiver side may already be gone during teardown; nothing to do.
        let _ = self.reports.send(report);
        Ok(())
    }
}

#[async_trait]
impl MmsTransport for LoopbackTransport {
    async fn send_multipart(&self, address: &str, body: &str, media: Vec<MediaPart>) -> Result<()> {
        debug!("Loopback accepting multipart for {} ({} parts)", address, media.len());
        self.sent.lock().await.push(SentRecord {
            address: address.to_string(),
            body: body.to_string(),
            media,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_outcome_classification() {
        let ok = DeliveryReport::ok(MessageLocator::sms(1));
        assert!(ok.is_ok());
        let failed = DeliveryReport::failed(MessageLocator::sms(1), 1);
        assert!(!failed.is_ok());
    }

    #[tokio::test]
    async fn test_loopback_records_and_reports() {
        let (transport, mut reports) = LoopbackTransport::new();
        transport
            .send_text("+15550001", "hello", MessageLocator::sms(3))
            .await
            .unwrap();

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].address, "+15550001");

        let report = reports.recv().await.unwrap();
        assert_eq!(report.receipt, MessageLocator::sms(3));
        assert!(report.is_ok());
    }

    #[tokio::test]
    async fn test_loopback_failure_outcome() {
        let (transport, mut reports) = LoopbackTransport::with_outcome(1);
        transport
            .send_text("+15550001", "hello", MessageLocator::sms(4))
            .await
            .unwrap();
        assert!(!reports.recv().await.unwrap().is_ok());
    }
}
