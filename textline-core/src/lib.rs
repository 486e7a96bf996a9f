//! Textline Messaging Core
//!
//! The conversation-synchronization and message-grouping core of an
//! SMS/MMS client. It reads the platform's unified SMS+MMS provider
//! through a narrow store abstraction, normalizes both schemas into one
//! typed message stream, aggregates per-thread conversation summaries,
//! clusters messages into renderable bubble groups, and pushes fresh
//! snapshots to the interface through an observable state container.
//!
//! The platform provider remains the single durable store; this crate owns
//! no persistence of its own and tolerates concurrent writers. Wire
//! encoding and radio access stay behind the transport seams.

pub mod contacts;
pub mod grouping;
pub mod model;
pub mod notify;
pub mod provider;
pub mod repository;
pub mod state;
pub mod transport;

mod error;

pub use contacts::{normalize_number, ContactResolver};
pub use error::{ClientError, Result};
pub use grouping::{group_messages, BubblePosition, GroupedMessage, CLUSTER_WINDOW_MS};
pub use model::{
    Attachment, ContactInfo, Conversation, Message, MessageBox, MILLIS_THRESHOLD,
};
pub use notify::{ChangeNotifier, ChangeTopic};
pub use provider::{
    ContactRow, ContactStore, MemoryStore, MessageLocator, MessageRow, MessageSource, PartRow,
    StoreSnapshot, TelephonyStore,
};
pub use repository::MessageRepository;
pub use state::{spawn_delivery_router, InboxState};
pub use transport::{
    DeliveryReport, LoopbackTransport, MediaPart, MmsTransport, SmsTransport, RESULT_OK,
};
