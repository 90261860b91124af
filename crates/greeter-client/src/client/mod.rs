//! Client side of the greeter demo.
//!
//! ## Submodules
//!
//! - [`config`] - CLI/env configuration and validation.
//! - [`driver`] - Dialing and the four call shapes.
//! - [`telemetry`] - Console logging.

pub mod config;
pub mod driver;
pub mod telemetry;
