//! Pure greeting logic behind every handler.
//!
//! [`Greeter`] holds nothing but the immutable greeting prefix, so handlers
//! can clone it freely and every call is a function of its input alone.

use greeter_core::{proto::HelloResponse, types::DEFAULT_GREETING};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct Greeter {
    greeting: Arc<str>,
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

impl Greeter {
    /// `greeting` must be non-empty; [`ServerConfig`] enforces this.
    ///
    /// [`ServerConfig`]: crate::server::config::ServerConfig
    pub fn new(greeting: impl Into<Arc<str>>) -> Self {
        Self {
            greeting: greeting.into(),
        }
    }

    /// The bare greeting returned by the unary call.
    pub fn hello(&self) -> HelloResponse {
        HelloResponse {
            message: self.greeting.to_string(),
        }
    }

    /// Greets a single name: `"Hello <name>"`.
    pub fn greet(&self, name: &str) -> HelloResponse {
        HelloResponse {
            message: format!("{} {}", self.greeting, name),
        }
    }

    /// One aggregate greeting for every name: `"Hello a, b, c"`.
    ///
    /// With no names this is the bare greeting.
    pub fn greet_all<S: AsRef<str>>(&self, names: &[S]) -> HelloResponse {
        if names.is_empty() {
            return self.hello();
        }
        let joined = names
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ");
        self.greet(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_is_the_bare_greeting() {
        let greeter = Greeter::default();
        assert_eq!(greeter.hello().message, "Hello");
        assert_eq!(greeter.hello(), greeter.hello());
    }

    #[test]
    fn greet_prefixes_the_name() {
        let greeter = Greeter::new("Hi");
        assert_eq!(greeter.greet("Alice").message, "Hi Alice");
    }

    #[test]
    fn greet_all_joins_in_order() {
        let greeter = Greeter::default();
        let names = ["Praveen", "Akhil", "Alice", "Bob"];
        assert_eq!(
            greeter.greet_all(&names).message,
            "Hello Praveen, Akhil, Alice, Bob"
        );
    }

    #[test]
    fn greet_all_without_names_is_still_a_greeting() {
        let greeter = Greeter::default();
        let names: [&str; 0] = [];
        let response = greeter.greet_all(&names);
        assert_eq!(response.message, "Hello");
        assert!(!response.message.is_empty());
    }
}
