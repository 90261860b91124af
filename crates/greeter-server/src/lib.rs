//! # `greeter-server`: the four gRPC call shapes, served by tonic
//!
//! The server implements `greet.GreetService` from [`greeter_core`]:
//!
//! - `SayHello` (unary) returns the configured greeting.
//! - `SayHelloServerStreaming` streams one greeting per requested name.
//! - `SayHelloClientStreaming` answers a stream of names with one aggregate
//!   greeting.
//! - `SayHelloBidirectionalStreaming` answers every received name as it
//!   arrives.
//!
//! Alongside the greeting service it serves gRPC health checks, server
//! reflection, grpc-web, and compressed messages.
//!
//! The binary in `main.rs` wires this up to a TCP or Unix socket listener;
//! [`server::serve_with_incoming`] is public so tests and benches can run the
//! same server in-process.

pub mod server;
