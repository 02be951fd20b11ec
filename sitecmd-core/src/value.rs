//! Loosely typed CLI values and primitive coercion
//!
//! Values read from the command line are untyped until they reach a handler
//! parameter that declares a primitive type. Coercion follows the usual
//! scalar conversion rules of dynamic languages:
//!
//! | from \ to | Bool                     | Int                       | Float               | String                  |
//! |-----------|--------------------------|---------------------------|---------------------|-------------------------|
//! | Bool      | itself                   | 0 / 1                     | 0.0 / 1.0           | `"1"` / `""`            |
//! | Int       | `0` is false             | itself                    | exact               | decimal                 |
//! | Float     | `0.0` is false           | truncated, NaN/inf → 0    | itself              | shortest form           |
//! | String    | `""` and `"0"` are false | leading numeric prefix    | leading numeric prefix | itself               |
//! | List      | empty is false           | empty → 0, else 1         | empty → 0.0, else 1.0 | elements joined by `,` |
//!
//! `Null` is never coerced by the binder; the conversions below still give
//! it the falsy value of each type for callers that need one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive types a handler parameter may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::String => "string",
        };
        f.write_str(name)
    }
}

/// A value resolved from CLI input or from a parameter default
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Multi-valued arguments and options; never coerced
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness of the value
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Integer conversion; strings use their leading numeric prefix
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Bool(b) => i64::from(*b),
            Value::Int(i) => *i,
            Value::Float(f) => float_to_int(*f),
            Value::String(s) => parse_int_prefix(s),
            Value::List(items) => i64::from(!items.is_empty()),
        }
    }

    /// Floating point conversion; strings use their leading numeric prefix
    pub fn to_float(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            Value::String(s) => parse_float_prefix(s),
            Value::List(items) => f64::from(u8::from(!items.is_empty())),
        }
    }

    /// Convert into the given primitive type
    pub fn coerce(self, ty: PrimitiveType) -> Value {
        match ty {
            PrimitiveType::Bool => Value::Bool(self.to_bool()),
            PrimitiveType::Int => Value::Int(self.to_int()),
            PrimitiveType::Float => Value::Float(self.to_float()),
            PrimitiveType::String => match self {
                Value::String(s) => Value::String(s),
                other => Value::String(other.to_string()),
            },
        }
    }

    /// Borrow the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list payload, if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Bool(false) => Ok(()),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) if v.is_nan() => f.write_str("NAN"),
            Value::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "INF" } else { "-INF" })
            }
            Value::Float(v) => write!(f, "{}", v),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

fn float_to_int(f: f64) -> i64 {
    if f.is_finite() {
        // `as` saturates out-of-range values
        f.trunc() as i64
    } else {
        0
    }
}

/// Longest prefix of `s` (after leading whitespace) that reads as a number
fn numeric_prefix(s: &str) -> Option<&str> {
    let t = s.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = t.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    Some(&t[..end])
}

/// Integer value of the leading numeric prefix of `s`, or 0 when there is none
///
/// `"12abc"` → 12, `" 7"` → 7, `"1e3"` → 1000, `"abc"` → 0.
pub fn parse_int_prefix(s: &str) -> i64 {
    let Some(prefix) = numeric_prefix(s) else {
        return 0;
    };

    match prefix.parse::<i64>() {
        Ok(i) => i,
        Err(_) => float_to_int(prefix.parse::<f64>().unwrap_or(0.0)),
    }
}

/// Float value of the leading numeric prefix of `s`, or 0.0 when there is none
pub fn parse_float_prefix(s: &str) -> f64 {
    numeric_prefix(s)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Split a comma-separated list of IDs, converting each token to an integer
///
/// Malformed tokens become 0; callers drop them.
pub fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split(',').map(parse_int_prefix).collect()
}
