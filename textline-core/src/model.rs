//! Message and Conversation Data Model
//!
//! Plain immutable records describing a message, its attachments, and a
//! per-thread conversation summary. All records are produced fresh by the
//! repository on every query; nothing here is persisted independently of
//! the provider that backs it.
//!
//! ## Date Normalization
//!
//! The unified provider view reports SMS timestamps in milliseconds and MMS
//! timestamps in seconds. Every `Message` carries a normalized
//! millisecond-scale `date`: MMS values below [`MILLIS_THRESHOLD`] are
//! scaled by 1000 at the decode boundary.

use serde::{Deserialize, Serialize};

/// Raw date values below this are second-scale and must be multiplied by
/// 1000 when the row is MMS.
pub const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Box indicator for a message row.
///
/// The numeric codes are shared between the SMS `type` column and the MMS
/// `msg_box` column; both schemas map onto this one enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageBox {
    /// Received message
    Inbox,
    /// Successfully sent
    Sent,
    /// Saved draft
    Draft,
    /// Inserted for sending, delivery outcome unknown
    Outbox,
    /// Send attempt failed
    Failed,
    /// Queued for sending
    Queued,
}

impl MessageBox {
    /// Decode a provider box code. Unknown codes decode to `Inbox` so an
    /// unrecognized row stays visible instead of being dropped.
    pub fn from_code(code: i32) -> Self {
        match code {
            2 => Self::Sent,
            3 => Self::Draft,
            4 => Self::Outbox,
            5 => Self::Failed,
            6 => Self::Queued,
            _ => Self::Inbox,
        }
    }

    /// Provider box code for this variant.
    pub fn code(&self) -> i32 {
        match self {
            Self::Inbox => 1,
            Self::Sent => 2,
            Self::Draft => 3,
            Self::Outbox => 4,
            Self::Failed => 5,
            Self::Queued => 6,
        }
    }

    /// Whether this box holds messages authored on this device (sent,
    /// sending, queued, or failed) as opposed to received ones.
    pub fn is_outgoing(&self) -> bool {
        matches!(self, Self::Sent | Self::Outbox | Self::Failed | Self::Queued)
    }
}

/// One non-text part of an MMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Opaque locator into the provider's part store
    pub uri: String,
    /// MIME type; drives rendering and export
    pub content_type: String,
    /// Display name, from the part's name column or its content-location
    pub file_name: Option<String>,
    /// Size in bytes when the provider reports one
    pub file_size: Option<u64>,
}

/// One delivered or composed unit of communication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Provider row id, unique within its source table
    pub id: i64,
    /// Thread this message belongs to
    pub thread_id: i64,
    /// Primary participant phone number; resolved from the MMS address
    /// relation when the row's own column is blank
    pub address: String,
    /// Text content; empty for attachment-only MMS
    pub body: String,
    /// Epoch milliseconds, normalized per [`MILLIS_THRESHOLD`]
    pub date: i64,
    /// Box indicator
    #[serde(rename = "box")]
    pub box_type: MessageBox,
    /// Read flag
    pub read: bool,
    /// True when the row's content-type column indicates a multipart body
    pub is_mms: bool,
    /// Ordered MMS parts; empty for pure SMS
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Whether this message was received rather than authored here.
    pub fn is_inbound(&self) -> bool {
        !self.box_type.is_outgoing() && self.box_type != MessageBox::Draft
    }
}

/// Aggregate view of one thread, derived entirely from its message set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Thread id
    pub thread_id: i64,
    /// Participant address of the most recent message
    pub address: String,
    /// Resolved contact display name, when the address matches a contact
    pub contact_name: Option<String>,
    /// Stable contact lookup locator
    pub contact_lookup_uri: Option<String>,
    /// Contact photo thumbnail locator
    pub photo_uri: Option<String>,
    /// Body of the most recent message
    pub last_message: String,
    /// Normalized timestamp of the most recent message
    pub last_message_date: i64,
    /// Count of unread inbound messages in the thread
    pub unread_count: usize,
}

/// Ephemeral contact lookup result. Never persisted; recomputed per address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Display name
    pub name: Option<String>,
    /// Stable lookup locator, durable across contact-database renumbering
    pub lookup_uri: Option<String>,
    /// Photo thumbnail locator
    pub photo_uri: Option<String>,
}

impl ContactInfo {
    /// The all-`None` result returned for blank numbers and lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }
}
