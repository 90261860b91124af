//! Shared types and error definitions used by both sides of the connection.
//!
//! ## Submodules
//!
//! - [`error`] - Error type for dialing, calls and streams.
//! - [`types`] - Defaults, call pattern labels and message helpers.
//! - [`proto`] - Generated Protobuf messages and service bindings.

pub mod error;
pub mod types;

pub use error::{Error, Result};

/// gRPC service and message definitions generated from `proto/greet.proto`.
pub mod proto {
    tonic::include_proto!("greet");

    /// Encoded descriptor set for the reflection service.
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("greet_descriptor");
}
