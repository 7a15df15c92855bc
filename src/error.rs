//! Error types for the start page core.
//!
//! Only [`StartPageError::SourceUnavailable`] stops rendering. Every other
//! variant is recoverable: callers on the rendering path log it and fall
//! back to the default ordering for the affected scope.

use crate::store::Slot;
use thiserror::Error;

/// Errors surfaced by the catalog loader, the slot store and the
/// [`StartPage`](crate::page::StartPage) facade.
#[derive(Error, Debug)]
pub enum StartPageError {
    /// The authoritative data source could not be read or parsed.
    #[error("Data source unavailable: {0}")]
    SourceUnavailable(String),

    /// A persisted slot holds a value that does not parse.
    #[error("Corrupt value in slot '{slot}': {source}")]
    CorruptSlot {
        slot: Slot,
        #[source]
        source: serde_json::Error,
    },

    /// A scope names a category that is not in the catalog.
    #[error("Unknown scope: {0}")]
    UnknownScope(String),

    /// Low-level I/O error from the backing storage.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("Failed to serialize slot '{slot}': {source}")]
    Serialize {
        slot: Slot,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, StartPageError>;
