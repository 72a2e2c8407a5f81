use serde::{Deserialize, Serialize};
use std::{fmt, hash::Hash};

/// A scalar carried by a search filter.
///
/// Deserializes from plain JSON scalars, so `[1, "red", true]` becomes
/// `[Int(1), String("red"), Boolean(true)]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        use Value::*;
        std::mem::discriminant(self).hash(state);
        match self {
            Int(v) => v.hash(state),
            Float(v) => {
                // Hash the bits of the float to handle NaN and -0.0 correctly
                let bits = v.to_bits();
                bits.hash(state);
            }
            String(v) => v.hash(state),
            Boolean(v) => v.hash(state),
            Null => {}
        }
    }
}

impl Value {
    /// Parses a command-line token: integers and floats become numbers,
    /// `true`/`false` booleans, `null` NULL, anything else a string.
    pub fn parse_literal(raw: &str) -> Self {
        if let Ok(v) = raw.parse::<i64>() {
            return Value::Int(v);
        }
        if let Ok(v) = raw.parse::<f64>()
            && v.is_finite()
        {
            return Value::Float(v);
        }
        match raw {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            "null" | "NULL" => Value::Null,
            _ => Value::String(raw.to_string()),
        }
    }

    /// Integer coercion that never fails.
    ///
    /// Strings contribute their leading numeric part, exponent included
    /// (`"42abc"` is 42, `"1e3"` is 1000, `"2.9"` is 2), and anything without
    /// one is 0. Floats truncate toward zero, non-finite floats give 0 and
    /// out-of-range values saturate.
    pub fn to_int_lossy(&self) -> i64 {
        match self {
            Value::Int(v) => *v,
            Value::Float(v) if v.is_finite() => v.trunc() as i64,
            Value::Float(_) => 0,
            Value::String(v) => leading_number(v),
            Value::Boolean(v) => i64::from(*v),
            Value::Null => 0,
        }
    }
}

fn leading_number(s: &str) -> i64 {
    let s = s.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = match bytes.first() {
        Some(b'-' | b'+') => 1,
        _ => 0,
    };
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    let mut is_float = false;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            is_float = true;
            end = frac_end;
        }
    }

    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'-' | b'+')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            is_float = true;
            end = exp_end;
        }
    }

    let number = &s[..end];
    if is_float {
        match number.parse::<f64>() {
            Ok(v) if v.is_finite() => v.trunc() as i64,
            _ => 0,
        }
    } else {
        number.parse::<i64>().unwrap_or(if number.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Null => write!(f, "NULL"),
        }
    }
}
