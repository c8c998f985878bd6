//! Row shaping.
//!
//! A [`Shape`] turns one fetched [`Row`] into whatever the caller wants back.
//! The store applies it once per row, in result order.

use super::value::{Row, Value};
use super::StoreError;

/// Per-row transform applied by the store after a query is drained.
pub trait Shape {
    type Output;

    fn shape(&self, row: Row) -> Self::Output;
}

/// Returns rows unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Shape for Identity {
    type Output = Row;

    fn shape(&self, row: Row) -> Row {
        row
    }
}

impl<F, T> Shape for F
where
    F: Fn(Row) -> T,
{
    type Output = T;

    fn shape(&self, row: Row) -> T {
        self(row)
    }
}

/// Ordered (column, default) pairs producing positional rows.
///
/// Position `i` of the output holds `row[key_i]` when the row has that column,
/// otherwise `default_i`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shaper {
    keys: Vec<(String, Value)>,
}

impl Shaper {
    pub fn new<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            keys: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Every column defaults to null.
    pub fn from_col_names<S: AsRef<str>>(cols: &[S]) -> Self {
        Self::new(cols.iter().map(|c| (c.as_ref(), Value::Null)))
    }

    /// Append one column with its default.
    pub fn col(mut self, key: impl Into<String>, default: impl Into<Value>) -> Self {
        self.keys.push((key.into(), default.into()));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn shape_row(&self, row: &Row) -> Vec<Value> {
        self.keys
            .iter()
            .map(|(key, default)| row.get(key).unwrap_or(default).clone())
            .collect()
    }

    pub fn shape_rows(&self, rows: &[Row]) -> Vec<Vec<Value>> {
        rows.iter().map(|row| self.shape_row(row)).collect()
    }
}

impl Shape for Shaper {
    type Output = Vec<Value>;

    fn shape(&self, row: Row) -> Vec<Value> {
        self.shape_row(&row)
    }
}

/// Projection of a fixed column list onto a requested subset.
///
/// Unknown columns are rejected when the selector is built, never per row.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSelector {
    picked: Vec<(usize, String)>,
}

impl ColumnSelector {
    pub fn new<A, W>(all_cols: &[A], wanted: &[W]) -> Result<Self, StoreError>
    where
        A: AsRef<str>,
        W: AsRef<str>,
    {
        let picked = wanted
            .iter()
            .map(|w| {
                let w = w.as_ref();
                all_cols
                    .iter()
                    .position(|c| c.as_ref() == w)
                    .map(|i| (i, w.to_string()))
                    .ok_or_else(|| StoreError::UnknownColumn {
                        name: w.to_string(),
                        available: all_cols.iter().map(|c| c.as_ref().to_string()).collect(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { picked })
    }

    /// Columns produced, in output order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.picked.iter().map(|(_, name)| name.as_str())
    }

    /// Positions of the picked columns within the full column list.
    pub fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.picked.iter().map(|(i, _)| *i)
    }

    /// Pick the columns by name. A column the row lacks reads as null.
    pub fn select(&self, row: &Row) -> Vec<Value> {
        self.picked
            .iter()
            .map(|(_, name)| row.get(name).cloned().unwrap_or_default())
            .collect()
    }

    /// Pick the columns by position from a row laid out like the full list.
    pub fn select_positional(&self, values: &[Value]) -> Vec<Value> {
        self.picked
            .iter()
            .map(|(i, _)| values.get(*i).cloned().unwrap_or_default())
            .collect()
    }
}

impl Shape for ColumnSelector {
    type Output = Vec<Value>;

    fn shape(&self, row: Row) -> Vec<Value> {
        self.select(&row)
    }
}
