//! Parameter binding
//!
//! A handler declares its parameters as a list of [`ParameterSpec`]s. On
//! every invocation the binder resolves each of them, in declaration order,
//! from the CLI input:
//!
//! 1. the parameter name is normalised (`skip_blogs` → `skip-blogs`)
//! 2. a positional argument of that name wins, then an option, then the
//!    declared default, then `Null`
//! 3. non-null values are coerced to the declared primitive type
//!
//! Binding never fails; handlers validate required values themselves.

use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::debug;

use crate::input::CliInput;
use crate::value::{PrimitiveType, Value};

/// How a parameter is exposed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Positional argument
    Argument,
    /// `--name` option
    Option,
    /// Not exposed; resolved from the default only (unless another
    /// definition of the same name exists)
    None,
}

/// One declared handler parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Identifier as declared by the handler (may contain underscores)
    pub name: String,
    pub kind: ParamKind,
    /// Primitive type the value is coerced to
    pub declared_type: Option<PrimitiveType>,
    /// Value used when the input defines nothing for this parameter
    pub default: Option<Value>,
    /// Help text for the generated CLI definition
    #[serde(default)]
    pub help: Option<String>,
}

impl ParameterSpec {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            declared_type: None,
            default: None,
            help: None,
        }
    }

    /// Positional argument parameter
    pub fn argument(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Argument)
    }

    /// Option parameter
    pub fn option(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Option)
    }

    /// Parameter with no CLI definition of its own
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::None)
    }

    pub fn typed(mut self, ty: PrimitiveType) -> Self {
        self.declared_type = Some(ty);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// CLI token name of this parameter
    pub fn cli_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Map a handler identifier to its CLI token name
pub fn normalize_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Values bound to a handler's parameters, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArguments {
    names: Vec<String>,
    values: Vec<Value>,
}

impl ResolvedArguments {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, name: String, value: Value) {
        self.names.push(name);
        self.values.push(value);
    }

    /// Value bound to the parameter declared with `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.values[i])
    }

    /// Non-null string value
    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Non-null integer value
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Non-null float value
    pub fn float(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Truthiness of the value; `false` when unbound
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(Value::to_bool)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Positional values, consuming the arguments
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Index<usize> for ResolvedArguments {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}

/// Resolve every parameter from the input
pub fn bind(parameters: &[ParameterSpec], input: &dyn CliInput) -> ResolvedArguments {
    let mut resolved = ResolvedArguments::default();

    for parameter in parameters {
        let name = parameter.cli_name();

        let value = if input.has_argument(&name) {
            input.get_argument(&name)
        } else if input.has_option(&name) {
            input.get_option(&name)
        } else if let Some(default) = &parameter.default {
            default.clone()
        } else {
            Value::Null
        };

        let value = match parameter.declared_type {
            Some(ty) if !value.is_null() => value.coerce(ty),
            _ => value,
        };

        debug!(parameter = %parameter.name, token = %name, ?value, "bound parameter");
        resolved.push(parameter.name.clone(), value);
    }

    resolved
}
