//! Scalar values accepted by path parameters and query strings.
//!
//! Every caller-supplied value is coerced into a [`Value`] up front, so
//! formatting is a single exhaustive `match` instead of a runtime type check.

use std::collections::BTreeMap;

/// Path parameters, keyed by placeholder name (without the leading `:`).
pub type Params = BTreeMap<String, Value>;

/// Query parameters, keyed by parameter name.
pub type Query = BTreeMap<String, Value>;

/// A parameter value.
///
/// # Examples
///
/// ```
/// use rip::Value;
///
/// assert_eq!(Value::from(42).to_param(), Some("42".to_string()));
/// assert_eq!(Value::from(1.5).to_param(), Some("1.500000".to_string()));
/// assert_eq!(Value::from("abc").to_param(), Some("abc".to_string()));
/// assert_eq!(Value::from(true).to_param(), None);
/// assert_eq!(Value::from(true).to_query(), Some("true".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Rendered verbatim.
    String(String),
    /// Rendered as base-10 digits.
    Integer(i64),
    /// Rendered with exactly six fractional digits.
    Float(f64),
    /// Rendered as `true` / `false` in query strings. Not substituted into paths.
    Boolean(bool),
    /// Maps, lists, null and anything else without a canonical string form.
    Unsupported,
}

impl Value {
    /// Returns the form substituted into a path template, if any.
    pub fn to_param(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(n) => Some(n.to_string()),
            Value::Float(f) => Some(format!("{f:.6}")),
            Value::Boolean(_) | Value::Unsupported => None,
        }
    }

    /// Returns the form written into a query string, if any.
    pub fn to_query(&self) -> Option<String> {
        match self {
            Value::Boolean(b) => Some(b.to_string()),
            other => other.to_param(),
        }
    }

    /// Returns `true` for every variant except [`Value::Unsupported`].
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Unsupported)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Out-of-range values keep their digits.
macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => Value::Integer(n),
                        Err(_) => Value::String(n.to_string()),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize, i128, u128);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Unsupported, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    n.as_f64().map_or(Value::Unsupported, Value::Float)
                }
            }
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => Value::Unsupported,
        }
    }
}

/// Collects `(name, value)` pairs into a parameter map.
pub(crate) fn collect<I, K, V>(entries: I) -> BTreeMap<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
