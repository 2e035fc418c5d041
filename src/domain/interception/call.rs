//! Identity and arguments of a single intercepted call

use std::fmt;

/// A method invocation routed through a [`DispatchProxy`](super::DispatchProxy)
///
/// Arguments are captured in their textual form only; hooks never see the typed
/// values, which keeps them independent of the intercepted interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedCall {
    interface: &'static str,
    method: &'static str,
    arguments: Vec<String>,
}

impl InterceptedCall {
    pub fn new(interface: &'static str, method: &'static str) -> Self {
        Self {
            interface,
            method,
            arguments: Vec::new(),
        }
    }

    /// Appends an argument using its `Display` form
    pub fn with_arg(mut self, argument: impl fmt::Display) -> Self {
        self.arguments.push(argument.to_string());
        self
    }

    pub fn interface(&self) -> &'static str {
        self.interface
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn first_argument(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// `<Interface>.<method>`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.interface, self.method)
    }
}

impl fmt::Display for InterceptedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({})",
            self.interface,
            self.method,
            self.arguments.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_identity() {
        let call = InterceptedCall::new("NumberService", "n_fibonacci").with_arg(5);

        assert_eq!(call.interface(), "NumberService");
        assert_eq!(call.method(), "n_fibonacci");
        assert_eq!(call.qualified_name(), "NumberService.n_fibonacci");
        assert_eq!(call.first_argument(), Some("5"));
    }

    #[test]
    fn test_call_without_arguments() {
        let call = InterceptedCall::new("Clock", "now");

        assert!(call.arguments().is_empty());
        assert_eq!(call.first_argument(), None);
        assert_eq!(call.to_string(), "Clock.now()");
    }

    #[test]
    fn test_call_display_lists_arguments() {
        let call = InterceptedCall::new("Lookup", "find")
            .with_arg("alpha")
            .with_arg(42);

        assert_eq!(call.to_string(), "Lookup.find(alpha, 42)");
    }
}
