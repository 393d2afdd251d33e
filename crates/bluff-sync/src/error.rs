//! Error taxonomy for the sync layer.

use thiserror::Error;

use crate::manager::ConnectionState;

/// Errors surfaced by the sync layer.
///
/// Only [`SyncError::TransportNotReady`] and [`SyncError::Encode`] reach
/// callers synchronously (from `send`). Connection-level failures surface as
/// the CLOSED state transition, never as a return value from `connect`.
#[derive(Debug, Error)]
pub enum SyncError {
    /// `send` was called while the connection was not OPEN.
    #[error("transport not ready: connection is {state}")]
    TransportNotReady {
        /// State observed at the time of the call.
        state: ConnectionState,
    },

    /// The connector failed to establish the transport.
    #[error("connect to {url} failed: {reason}")]
    ConnectFailed {
        /// Address the connector was given.
        url: String,
        /// Transport-level failure description.
        reason: String,
    },

    /// The established transport failed mid-stream.
    #[error("transport error: {reason}")]
    Transport {
        /// Transport-level failure description.
        reason: String,
    },

    /// An outbound event could not be serialized.
    #[error("encode outbound event: {0}")]
    Encode(#[from] serde_json::Error),
}
