use serde::Serialize;
use std::error::Error;

use super::QueryCmd;
use crate::commands::Execute;
use crate::db::{QueryArgs, Store, Value};

/// Result of the query command: the rows as positional tuples.
#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Execute for QueryCmd {
    type Output = QueryResult;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        if !store.has_query(&self.name) {
            return Err(format!("Unknown query: '{}'", self.name).into());
        }

        let args: QueryArgs = self.args.into_iter().collect();
        let rows = store.query(&self.name, args).await?;
        let columns = rows
            .first()
            .map(|r| r.columns().to_vec())
            .unwrap_or_default();

        Ok(QueryResult {
            name: self.name,
            columns,
            rows: rows.into_iter().map(|r| r.into_values()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::QueryArg;

    crate::execute_test! {
        test_name: test_query_with_args,
        cmd: QueryCmd {
            name: "dem_by_year".to_string(),
            args: vec![
                ("year".to_string(), QueryArg::Integer(2023)),
                ("type".to_string(), QueryArg::Text("t".to_string())),
            ],
        },
        assertions: |result| {
            assert_eq!(result.columns[0], "code");
            assert_eq!(result.rows.len(), 2);
            assert_eq!(result.rows[0][0], Value::from("ESP"));
            assert_eq!(result.rows[1][0], Value::from("ITA"));
        },
    }

    crate::execute_test! {
        test_name: test_query_without_rows,
        cmd: QueryCmd {
            name: "fert_by_year".to_string(),
            args: vec![("year".to_string(), QueryArg::Integer(1950))],
        },
        assertions: |result| {
            assert!(result.columns.is_empty());
            assert!(result.rows.is_empty());
        },
    }

    #[tokio::test]
    async fn test_query_unknown_name_is_an_error() {
        let store = crate::test_utils::seeded_store().await;
        let cmd = QueryCmd {
            name: "nope".to_string(),
            args: vec![],
        };
        let err = cmd.execute(&store).await.unwrap_err();
        assert!(err.to_string().contains("Unknown query"));
    }

    crate::execute_empty_db_test! {
        cmd: QueryCmd {
            name: "countries_all".to_string(),
            args: vec![],
        },
    }
}
