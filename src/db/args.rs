//! Query argument coercion.
//!
//! Call sites hand over strings, integers, enum-like values or anything with a
//! string form. [`QueryArg`] captures those as a closed set of variants and
//! [`QueryArg::to_primitive`] maps each one to what the engine accepts: null,
//! text, integer or boolean. Nothing composite ever reaches a backend.

use std::collections::BTreeMap;
use std::fmt;

use super::value::Value;

/// Coerced query parameters, keyed by parameter name.
pub type Params = BTreeMap<String, Value>;

/// Values that stand for a fixed choice and are passed to queries by name.
pub trait Symbolic {
    fn symbol(&self) -> &str;
}

/// One call-site argument, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryArg {
    Null,
    Text(String),
    Integer(i64),
    Boolean(bool),
    /// A fixed-choice value, passed as its symbolic name.
    Symbolic(String),
}

impl QueryArg {
    /// Capture a fixed-choice value by its symbolic name.
    pub fn symbol<S: Symbolic + ?Sized>(value: &S) -> Self {
        QueryArg::Symbolic(value.symbol().to_string())
    }

    /// Capture any other value by its string representation.
    pub fn display<D: fmt::Display + ?Sized>(value: &D) -> Self {
        QueryArg::Text(value.to_string())
    }

    /// The primitive handed to the engine.
    pub fn to_primitive(&self) -> Value {
        match self {
            QueryArg::Null => Value::Null,
            QueryArg::Text(s) | QueryArg::Symbolic(s) => Value::Text(s.clone()),
            QueryArg::Integer(i) => Value::Int(*i),
            QueryArg::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for QueryArg {
    fn from(s: &str) -> Self {
        QueryArg::Text(s.to_string())
    }
}

impl From<String> for QueryArg {
    fn from(s: String) -> Self {
        QueryArg::Text(s)
    }
}

impl From<i64> for QueryArg {
    fn from(i: i64) -> Self {
        QueryArg::Integer(i)
    }
}

impl From<i32> for QueryArg {
    fn from(i: i32) -> Self {
        QueryArg::Integer(i64::from(i))
    }
}

impl From<u32> for QueryArg {
    fn from(i: u32) -> Self {
        QueryArg::Integer(i64::from(i))
    }
}

impl From<bool> for QueryArg {
    fn from(b: bool) -> Self {
        QueryArg::Boolean(b)
    }
}

/// Floats are not engine primitives; they travel as text.
impl From<f64> for QueryArg {
    fn from(x: f64) -> Self {
        QueryArg::display(&x)
    }
}

impl<T: Symbolic> From<&T> for QueryArg {
    fn from(value: &T) -> Self {
        QueryArg::symbol(value)
    }
}

impl<T: Into<QueryArg>> From<Option<T>> for QueryArg {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(QueryArg::Null)
    }
}

/// Arbitrary JSON (from configuration files) coerces the same way.
impl From<serde_json::Value> for QueryArg {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => QueryArg::Null,
            serde_json::Value::Bool(b) => QueryArg::Boolean(b),
            serde_json::Value::String(s) => QueryArg::Text(s),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => QueryArg::Integer(i),
                None => QueryArg::Text(n.to_string()),
            },
            other => QueryArg::Text(other.to_string()),
        }
    }
}

/// The argument set of one call. Built fresh for every query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryArgs {
    args: BTreeMap<String, QueryArg>,
}

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument, replacing any previous value for `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryArg>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryArg>) {
        self.args.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&QueryArg> {
        self.args.get(key)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Coerce every argument to its engine primitive.
    pub fn coerce(&self) -> Params {
        self.args
            .iter()
            .map(|(k, v)| (k.clone(), v.to_primitive()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryArgs
where
    K: Into<String>,
    V: Into<QueryArg>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            args: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for QueryArgs {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}
