//! gRPC service implementation.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`HelloService`).
//! - [`greeting`] - Pure greeting construction shared by every handler.

pub mod greeting;
pub mod handler;
