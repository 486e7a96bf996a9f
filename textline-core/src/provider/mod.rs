//! Provider Abstraction
//!
//! The platform telephony and contacts content providers are the single
//! source of truth for this client. This module abstracts them behind two
//! narrow async traits — query-by-criteria reads plus the handful of writes
//! the repository needs — so the repository logic runs unchanged against
//! the real providers or the in-memory fake in [`memory`].
//!
//! ## Raw Rows
//!
//! Provider rows arrive with optional columns: the unified SMS+MMS view
//! only populates the columns a row's source table has, and a column can be
//! absent entirely. Raw row records model that state as `Option` fields.
//! Decoding them into total [`Message`](crate::model::Message) values with
//! defined defaults happens in one place, the repository's normalization
//! boundary — a "missing column" never leaks past it.

pub mod memory;

use crate::error::{ClientError, Result};
use crate::model::MessageBox;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use memory::{MemoryStore, StoreSnapshot};

/// Sentinel the MMS schema stores in the address column before the real
/// address is known; treated the same as a blank address.
pub const ADDRESS_PLACEHOLDER: &str = "insert-address-token";

/// Source table of a message row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSource {
    Sms,
    Mms,
}

/// Opaque locator for one message row, returned by inserts and accepted by
/// status updates. Rendered in the provider's content-URI shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageLocator {
    /// Table the row lives in
    pub source: MessageSource,
    /// Row id within that table
    pub row_id: i64,
}

impl MessageLocator {
    pub fn sms(row_id: i64) -> Self {
        Self { source: MessageSource::Sms, row_id }
    }

    pub fn mms(row_id: i64) -> Self {
        Self { source: MessageSource::Mms, row_id }
    }

    /// Parse a content-URI-shaped locator string.
    pub fn parse(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("content://")
            .ok_or_else(|| ClientError::InvalidLocator(uri.to_string()))?;
        let (table, id) = rest
            .split_once('/')
            .ok_or_else(|| ClientError::InvalidLocator(uri.to_string()))?;
        let row_id: i64 = id
            .parse()
            .map_err(|_| ClientError::InvalidLocator(uri.to_string()))?;
        match table {
            "sms" => Ok(Self::sms(row_id)),
            "mms" => Ok(Self::mms(row_id)),
            _ => Err(ClientError::InvalidLocator(uri.to_string())),
        }
    }
}

impl fmt::Display for MessageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            MessageSource::Sms => write!(f, "content://sms/{}", self.row_id),
            MessageSource::Mms => write!(f, "content://mms/{}", self.row_id),
        }
    }
}

/// Part-store locator for an MMS part row.
pub fn part_uri(part_id: i64) -> String {
    format!("content://mms/part/{part_id}")
}

/// One row of the unified SMS+MMS conversation view, columns as reported.
///
/// Field names mirror the provider columns (`_id`, `thread_id`, `ct_t`, …)
/// so snapshots read like a provider dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageRow {
    #[serde(rename = "_id")]
    pub id: Option<i64>,
    pub thread_id: Option<i64>,
    pub address: Option<String>,
    pub body: Option<String>,
    pub date: Option<i64>,
    #[serde(rename = "type")]
    pub msg_type: Option<i32>,
    pub read: Option<i32>,
    /// MMS content type (`ct_t`); `None` for SMS rows
    pub ct_t: Option<String>,
}

/// One row of the MMS parts relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartRow {
    #[serde(rename = "_id")]
    pub id: Option<i64>,
    /// Part content type (`ct`)
    pub ct: Option<String>,
    /// Inline text for `text/plain` parts
    pub text: Option<String>,
    /// Part name column
    pub name: Option<String>,
    /// Content-location fallback (`cl`), often carries the file name
    pub cl: Option<String>,
    /// Part size in bytes when reported
    pub size: Option<u64>,
}

/// One row of a contacts reverse lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRow {
    pub display_name: Option<String>,
    pub lookup_key: Option<String>,
    #[serde(rename = "_id")]
    pub id: Option<i64>,
    pub photo_thumbnail_uri: Option<String>,
}

/// Narrow read/write surface over the telephony provider.
///
/// Reads that find nothing return empty collections or `None`, never an
/// error. Writes return what the provider reports (the inserted row's
/// locator, or how many rows an update touched).
#[async_trait]
pub trait TelephonyStore: Send + Sync {
    /// All rows of the unified SMS+MMS view, in provider order
    /// (date-descending best effort; callers must not rely on it being
    /// strict across mixed SMS/MMS timestamp units).
    async fn conversation_rows(&self) -> Result<Vec<MessageRow>>;

    /// Rows of one thread, in provider order.
    async fn thread_rows(&self, thread_id: i64) -> Result<Vec<MessageRow>>;

    /// Parts relation rows for one MMS row id.
    async fn message_parts(&self, message_id: i64) -> Result<Vec<PartRow>>;

    /// Sender address from the MMS address relation, if any.
    async fn message_address(&self, message_id: i64) -> Result<Option<String>>;

    /// Raw bytes of one part, by part-store locator.
    async fn read_part(&self, uri: &str) -> Result<Vec<u8>>;

    /// Insert an outbox row (read, box outbox) and return its locator.
    async fn insert_outbox(&self, address: &str, body: &str, date: i64) -> Result<MessageLocator>;

    /// Insert an unread inbox row and return its locator.
    async fn insert_inbox(&self, address: &str, body: &str, date: i64) -> Result<MessageLocator>;

    /// Move one row to another box. Returns whether a row matched; a
    /// locator that matches nothing is not an error.
    async fn set_message_box(&self, locator: &MessageLocator, to: MessageBox) -> Result<bool>;

    /// Mark every unread row of a thread read. Returns rows updated.
    async fn mark_thread_read(&self, thread_id: i64) -> Result<usize>;

    /// Resolve the thread id for an address, creating a thread if the
    /// address has none yet.
    async fn thread_id_for_address(&self, address: &str) -> Result<i64>;
}

/// Reverse phone-number lookup against the contacts provider.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// First match for a phone number, or `None`.
    async fn lookup_by_number(&self, number: &str) -> Result<Option<ContactRow>>;
}
