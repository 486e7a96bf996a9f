//! Error handling for the messaging core
//!
//! One error type covers every fallible operation in the crate. Partial or
//! missing provider data is never an error: queries that find nothing
//! return empty results, and malformed rows are defaulted at the decode
//! boundary. Errors are reserved for conditions the immediate caller must
//! act on, such as a failed send.

use thiserror::Error;

/// Result type for messaging-core operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during repository and transport operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// I/O error (attachment export, snapshot files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error (store snapshots)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing provider rejected or failed an operation outright.
    ///
    /// Not used for empty results; those are `Ok` with nothing in them.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A send primitive failed to hand the message off
    #[error("Transport error: {0}")]
    Transport(String),

    /// An attachment part locator matched nothing in the part store
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A message locator could not be parsed or routed
    #[error("Invalid message locator: {0}")]
    InvalidLocator(String),

    /// A thread id could not be resolved or created for an address
    #[error("Thread resolution failed for address: {0}")]
    ThreadResolution(String),
}
