//! # Shared Defaults and Message Helpers
//!
//! Constants and small helpers shared by the client and the server so that
//! both sides agree on the demo's defaults without duplicating literals.
//!
//! ## Constants
//!
//! - [`DEFAULT_PORT`] - TCP port the server listens on and the client dials
//! - [`DEFAULT_GREETING`] - Greeting returned by the unary call
//! - [`DEFAULT_NAMES`] - Names the client driver sends when none are given
//!
//! ## Types
//!
//! - [`CallPattern`] - The four gRPC call shapes, used to label logs and
//!   errors

use crate::proto::{HelloRequest, NamesList};
use core::fmt;

/// Port used by both binaries unless overridden.
pub const DEFAULT_PORT: u16 = 8080;

/// Greeting returned by `SayHello` and used as the prefix of every other
/// response.
pub const DEFAULT_GREETING: &str = "Hello";

/// Names exercised by the client driver by default.
pub const DEFAULT_NAMES: [&str; 4] = ["Praveen", "Akhil", "Alice", "Bob"];

/// One of the four gRPC call shapes exposed by `GreetService`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallPattern {
    Unary,
    ServerStreaming,
    ClientStreaming,
    BidirectionalStreaming,
}

impl CallPattern {
    /// All patterns in the order the client driver runs them.
    pub const ALL: [CallPattern; 4] = [
        CallPattern::Unary,
        CallPattern::ServerStreaming,
        CallPattern::ClientStreaming,
        CallPattern::BidirectionalStreaming,
    ];

    /// The RPC method implementing this pattern.
    pub const fn method(self) -> &'static str {
        match self {
            CallPattern::Unary => "SayHello",
            CallPattern::ServerStreaming => "SayHelloServerStreaming",
            CallPattern::ClientStreaming => "SayHelloClientStreaming",
            CallPattern::BidirectionalStreaming => "SayHelloBidirectionalStreaming",
        }
    }
}

impl fmt::Display for CallPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

impl NamesList {
    /// One request per name, preserving order.
    pub fn to_requests(&self) -> Vec<HelloRequest> {
        self.names
            .iter()
            .map(|name| HelloRequest { name: name.clone() })
            .collect()
    }

    /// The default list sent by the client driver.
    pub fn defaults() -> Self {
        DEFAULT_NAMES.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for NamesList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_preserve_name_order() {
        let names = NamesList::defaults();
        let requests = names.to_requests();
        let sent: Vec<&str> = requests.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(sent, DEFAULT_NAMES);
    }

    #[test]
    fn empty_list_has_no_requests() {
        let names: NamesList = Vec::<String>::new().into_iter().collect();
        assert!(names.to_requests().is_empty());
    }

    #[test]
    fn patterns_display_as_method_names() {
        let methods: Vec<String> = CallPattern::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            methods,
            [
                "SayHello",
                "SayHelloServerStreaming",
                "SayHelloClientStreaming",
                "SayHelloBidirectionalStreaming"
            ]
        );
    }
}
