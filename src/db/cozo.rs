//! CozoDB backend implementation.
//!
//! Catalog definitions are CozoScript. Parameters stay named: cozo resolves
//! `$name` against the parameter map itself, so binding only checks the text.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use cozo::{DataValue, DbInstance, NamedRows, Num, ScriptMutability};

use super::args::Params;
use super::backend::{Connection, Engine, ParamBinding, RowStream, Statement};
use super::catalog::{CatalogError, QueryDefinition};
use super::value::{Row, Value};
use super::StoreError;

/// Where an embedded cozo instance keeps its data.
#[derive(Debug, Clone, PartialEq)]
pub enum CozoStorage {
    /// In-process memory, gone when the connection closes.
    Mem,
    /// SQLite file at the given path.
    Sqlite(PathBuf),
}

/// Embedded CozoDB engine.
#[derive(Debug, Clone, PartialEq)]
pub struct CozoEngine {
    storage: CozoStorage,
}

impl CozoEngine {
    pub fn new(storage: CozoStorage) -> Self {
        Self { storage }
    }

    pub fn mem() -> Self {
        Self::new(CozoStorage::Mem)
    }

    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self::new(CozoStorage::Sqlite(path.into()))
    }

    pub fn storage(&self) -> &CozoStorage {
        &self.storage
    }
}

impl Engine for CozoEngine {
    fn name(&self) -> &'static str {
        match self.storage {
            CozoStorage::Mem => "CozoMem",
            CozoStorage::Sqlite(_) => "CozoSqlite",
        }
    }

    fn bind(&self, definition: &QueryDefinition) -> Result<Statement, CatalogError> {
        // CozoScript has no `--` comments, so catalog comment lines are dropped.
        let text = definition
            .text
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        if text.trim().is_empty() {
            return Err(CatalogError::BindFailed {
                name: definition.name.clone(),
                message: "empty script".to_string(),
            });
        }
        Ok(Statement {
            text,
            binding: ParamBinding::Named,
        })
    }

    fn connect(&self) -> Result<Box<dyn Connection>, StoreError> {
        let db = match &self.storage {
            CozoStorage::Mem => DbInstance::new("mem", "", ""),
            CozoStorage::Sqlite(path) => DbInstance::new("sqlite", path, ""),
        }
        .map_err(|e| StoreError::ConnectFailed {
            engine: self.name().to_string(),
            message: format!("{:?}", e),
        })?;
        Ok(Box::new(CozoConnection { db }))
    }
}

struct CozoConnection {
    db: DbInstance,
}

impl Connection for CozoConnection {
    fn execute<'c>(
        &'c mut self,
        statement: &Statement,
        params: &Params,
    ) -> Result<RowStream<'c>, StoreError> {
        let rows = self
            .db
            .run_script(&statement.text, convert_params(params), ScriptMutability::Mutable)
            .map_err(|e| StoreError::Engine {
                message: format!("{:?}", e),
            })?;
        Ok(Box::new(convert_rows(rows).map(Ok::<Row, StoreError>)))
    }
}

/// Converts coerced parameters to cozo's `BTreeMap<String, DataValue>` format.
fn convert_params(params: &Params) -> BTreeMap<String, DataValue> {
    params
        .iter()
        .map(|(k, v)| {
            let data_value = match v {
                Value::Null => DataValue::Null,
                Value::Bool(b) => DataValue::Bool(*b),
                Value::Int(i) => DataValue::Num(Num::Int(*i)),
                Value::Float(f) => DataValue::Num(Num::Float(*f)),
                Value::Text(s) => DataValue::Str(s.as_str().into()),
            };
            (k.clone(), data_value)
        })
        .collect()
}

fn convert_rows(named_rows: NamedRows) -> impl Iterator<Item = Row> {
    let columns: Arc<[String]> = named_rows.headers.into();
    named_rows
        .rows
        .into_iter()
        .map(move |values| Row::new(Arc::clone(&columns), values.into_iter().map(convert_value).collect()))
}

fn convert_value(value: DataValue) -> Value {
    match value {
        DataValue::Null => Value::Null,
        DataValue::Bool(b) => Value::Bool(b),
        DataValue::Num(Num::Int(i)) => Value::Int(i),
        DataValue::Num(Num::Float(f)) => Value::Float(f),
        DataValue::Str(s) => Value::Text(s.to_string()),
        other => Value::Text(format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn statement(text: &str) -> Statement {
        Statement {
            text: text.to_string(),
            binding: ParamBinding::Named,
        }
    }

    fn run(conn: &mut dyn Connection, text: &str, params: &Params) -> Result<Vec<Row>, StoreError> {
        conn.execute(&statement(text), params)?.collect()
    }

    #[test]
    fn test_connect_mem() {
        let engine = CozoEngine::mem();
        assert_eq!(engine.name(), "CozoMem");
        assert!(engine.connect().is_ok());
    }

    #[test]
    fn test_sqlite_storage_persists_between_connections() {
        let dir = tempfile::tempdir().unwrap();
        let engine = CozoEngine::sqlite(dir.path().join("demography.db"));
        assert_eq!(engine.name(), "CozoSqlite");

        let mut conn = engine.connect().unwrap();
        run(
            conn.as_mut(),
            "?[code, name] <- [['ESP', 'Spain']] :create country {code => name}",
            &Params::new(),
        )
        .unwrap();
        conn.close().unwrap();

        let mut conn = engine.connect().unwrap();
        let rows = run(conn.as_mut(), "?[name] := *country{code: 'ESP', name}", &Params::new()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&Value::from("Spain")));
    }

    #[test]
    fn test_named_params_and_headers() {
        let mut conn = CozoEngine::mem().connect().unwrap();
        let mut params = Params::new();
        params.insert("code".to_string(), Value::from("FRA"));
        params.insert("year".to_string(), Value::Int(2020));

        let rows = run(conn.as_mut(), "?[code, year] <- [[$code, $year]]", &params).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].columns(), &["code".to_string(), "year".to_string()]);
        assert_eq!(rows[0].get("code"), Some(&Value::from("FRA")));
        assert_eq!(rows[0].get("year"), Some(&Value::Int(2020)));
    }

    #[test]
    fn test_missing_param_is_engine_error() {
        let mut conn = CozoEngine::mem().connect().unwrap();
        let err = run(conn.as_mut(), "?[x] <- [[$missing]]", &Params::new()).unwrap_err();
        assert!(matches!(err, StoreError::Engine { .. }));
    }

    #[rstest]
    #[case(Value::Null, DataValue::Null)]
    #[case(Value::Bool(true), DataValue::Bool(true))]
    #[case(Value::Int(7), DataValue::Num(Num::Int(7)))]
    #[case(Value::Float(1.5), DataValue::Num(Num::Float(1.5)))]
    #[case(Value::from("ESP"), DataValue::Str("ESP".into()))]
    fn test_convert_params(#[case] input: Value, #[case] expected: DataValue) {
        let mut params = Params::new();
        params.insert("p".to_string(), input);
        assert_eq!(convert_params(&params)["p"], expected);
    }

    #[test]
    fn test_convert_value_falls_back_to_text() {
        assert_eq!(convert_value(DataValue::Num(Num::Float(2.5))), Value::Float(2.5));
        let list = convert_value(DataValue::List(vec![DataValue::Num(Num::Int(1))]));
        assert!(matches!(list, Value::Text(_)));
    }

    #[test]
    fn test_bind_drops_comment_lines() {
        let definition = QueryDefinition {
            name: "commented".into(),
            params: vec![],
            doc: None,
            text: "?[x] := x = 1\n-- inline note\n:limit 1".into(),
        };
        let statement = CozoEngine::mem().bind(&definition).unwrap();
        assert_eq!(statement.text, "?[x] := x = 1\n:limit 1");

        let mut conn = CozoEngine::mem().connect().unwrap();
        let rows = run(conn.as_mut(), &statement.text, &Params::new()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_bind_rejects_comment_only_script() {
        let definition = QueryDefinition {
            name: "comments".into(),
            params: vec![],
            doc: None,
            text: "-- nothing here".into(),
        };
        assert!(matches!(
            CozoEngine::mem().bind(&definition),
            Err(CatalogError::BindFailed { .. })
        ));
    }

    #[test]
    fn test_bind_rejects_blank_script() {
        let definition = QueryDefinition {
            name: "blank".into(),
            params: vec![],
            doc: None,
            text: "   ".into(),
        };
        assert!(matches!(
            CozoEngine::mem().bind(&definition),
            Err(CatalogError::BindFailed { .. })
        ));
    }
}
