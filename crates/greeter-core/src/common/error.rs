//! Error types for the greeter demo.
//!
//! The only failures in this system come from the transport: dialing the
//! server, a call the server rejects, or a stream that breaks before its
//! natural end. Handlers themselves never fail. `From<Error>` for
//! [`tonic::Status`] lets server code propagate these with `?`.
//!
//! ## Error Cases
//! - `Connect`: The endpoint is invalid or the server could not be reached.
//! - `Call`: The call failed before any response item was received.
//! - `Stream`: A request or response stream broke mid-flight.
//! - `ChannelError`: An internal channel between tasks closed early.

use crate::types::CallPattern;
use tonic::Status;

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for the greeter client and server.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid endpoint or failure to establish the connection.
    #[error("Connection error: {0}")]
    Connect(#[from] tonic::transport::Error),

    /// The server rejected the call or the connection dropped before a reply.
    #[error("{pattern} call failed: {}", .status.message())]
    Call { pattern: CallPattern, status: Status },

    /// A stream ended with an error instead of a normal end-of-stream.
    #[error("{pattern} stream failed: {}", .status.message())]
    Stream { pattern: CallPattern, status: Status },

    /// Internal channel send/receive failure.
    #[error("Channel error: {context}")]
    ChannelError { context: String },
}

impl Error {
    /// The gRPC status carried by call and stream failures.
    pub fn status(&self) -> Option<&Status> {
        match self {
            Error::Call { status, .. } | Error::Stream { status, .. } => Some(status),
            Error::Connect(_) | Error::ChannelError { .. } => None,
        }
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::Connect(e) => Status::unavailable(format!("Connection error: {}", e)),
            Error::Call { status, .. } | Error::Stream { status, .. } => status,
            Error::ChannelError { context } => {
                Status::internal(format!("Channel error: {}", context))
            }
        }
    }
}
