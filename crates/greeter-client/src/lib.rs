//! # `greeter-client`: drives every gRPC call shape once
//!
//! [`client::driver::run`] opens one connection to a greeter server and calls
//! `SayHello`, `SayHelloServerStreaming`, `SayHelloClientStreaming` and
//! `SayHelloBidirectionalStreaming` in that order, strictly one after
//! another. The individual calls are public too, so each shape can be driven
//! on its own.

pub mod client;
