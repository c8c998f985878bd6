//! Type conversion between [`Value`] and PostgreSQL wire types.
//!
//! Parameters are converted against the types the server inferred when the
//! statement was prepared, so `$year` can travel as `int4` in one query and
//! `text` in another. Result columns are read by their declared type.

use std::sync::Arc;

use postgres::types::{ToSql, Type};

use crate::db::value::{Row, Value};
use crate::db::StoreError;

/// One positional argument, ready for `query_raw`.
pub(super) type SqlParam = Box<dyn ToSql + Sync + Send>;

const TEXT_TYPES: [Type; 5] = [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME, Type::UNKNOWN];

/// Convert one named argument to the parameter type `ty`.
pub(super) fn to_sql(name: &str, value: &Value, ty: &Type) -> Result<SqlParam, StoreError> {
    let mismatch = || StoreError::Engine {
        message: format!(
            "parameter '{}': cannot pass {} '{}' as {}",
            name,
            value.type_name(),
            value,
            ty
        ),
    };

    let param: SqlParam = if *ty == Type::BOOL {
        Box::new(as_bool(value).ok_or_else(mismatch)?)
    } else if *ty == Type::INT2 {
        let v = as_int(value).ok_or_else(mismatch)?;
        Box::new(v.map(i16::try_from).transpose().map_err(|_| mismatch())?)
    } else if *ty == Type::INT4 {
        let v = as_int(value).ok_or_else(mismatch)?;
        Box::new(v.map(i32::try_from).transpose().map_err(|_| mismatch())?)
    } else if *ty == Type::INT8 {
        Box::new(as_int(value).ok_or_else(mismatch)?)
    } else if *ty == Type::FLOAT4 {
        Box::new(as_float(value).ok_or_else(mismatch)?.map(|f| f as f32))
    } else if *ty == Type::FLOAT8 {
        Box::new(as_float(value).ok_or_else(mismatch)?)
    } else if TEXT_TYPES.contains(ty) {
        Box::new((!value.is_null()).then(|| value.to_string()))
    } else {
        return Err(StoreError::Engine {
            message: format!(
                "parameter '{}': unsupported parameter type {}; cast it in the query",
                name, ty
            ),
        });
    };
    Ok(param)
}

// The outer `None` means the value cannot be represented; the inner one is SQL NULL.

fn as_bool(value: &Value) -> Option<Option<bool>> {
    match value {
        Value::Null => Some(None),
        Value::Bool(b) => Some(Some(*b)),
        Value::Text(s) => s.parse().ok().map(Some),
        Value::Int(_) | Value::Float(_) => None,
    }
}

fn as_int(value: &Value) -> Option<Option<i64>> {
    match value {
        Value::Null => Some(None),
        Value::Int(i) => Some(Some(*i)),
        Value::Float(f) if f.fract() == 0.0 => Some(Some(*f as i64)),
        Value::Text(s) => s.trim().parse().ok().map(Some),
        Value::Bool(_) | Value::Float(_) => None,
    }
}

fn as_float(value: &Value) -> Option<Option<f64>> {
    match value {
        Value::Null => Some(None),
        Value::Int(i) => Some(Some(*i as f64)),
        Value::Float(f) => Some(Some(*f)),
        Value::Text(s) => s.trim().parse().ok().map(Some),
        Value::Bool(_) => None,
    }
}

/// Convert a result row, reading each column by its declared type.
pub(super) fn convert_row(columns: &Arc<[String]>, row: &postgres::Row) -> Result<Row, StoreError> {
    let values = row
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| column_value(row, idx, column.name(), column.type_()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Row::new(Arc::clone(columns), values))
}

fn column_value(row: &postgres::Row, idx: usize, name: &str, ty: &Type) -> Result<Value, StoreError> {
    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(idx).map(Value::from)
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)
            .map(|v| Value::from(v.map(i64::from)))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx).map(Value::from)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx).map(Value::from)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)
            .map(|v| Value::from(v.map(f64::from)))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx).map(Value::from)
    } else if TEXT_TYPES.contains(ty) {
        row.try_get::<_, Option<String>>(idx).map(Value::from)
    } else {
        return Err(StoreError::Engine {
            message: format!(
                "column '{}': unsupported column type {}; cast it in the query",
                name, ty
            ),
        });
    };
    value.map_err(|e| StoreError::Engine {
        message: format!("column '{}': {}", name, e),
    })
}
