//! CLI input abstraction
//!
//! The binder and the tenant resolver only need to ask whether an argument
//! or option is defined and read its value. Token names are hyphenated and
//! lowercase (`skip-blogs`).

use std::collections::HashMap;

use crate::value::Value;

/// Read access to parsed command line input
pub trait CliInput {
    /// Whether a positional argument with this name is defined
    fn has_argument(&self, name: &str) -> bool;

    /// Value of a positional argument, `Null` when not given
    fn get_argument(&self, name: &str) -> Value;

    /// Whether an option with this name is defined
    fn has_option(&self, name: &str) -> bool;

    /// Value of an option, `Null` when not given and without default
    fn get_option(&self, name: &str) -> Value;
}

/// In-memory input, for scripted invocations and tests
#[derive(Debug, Clone, Default)]
pub struct StaticInput {
    arguments: HashMap<String, Value>,
    options: HashMap<String, Value>,
}

impl StaticInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a positional argument
    pub fn argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    /// Define an option
    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}

impl CliInput for StaticInput {
    fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    fn get_argument(&self, name: &str) -> Value {
        self.arguments.get(name).cloned().unwrap_or_default()
    }

    fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    fn get_option(&self, name: &str) -> Value {
        self.options.get(name).cloned().unwrap_or_default()
    }
}
