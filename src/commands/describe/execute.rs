use serde::Serialize;
use std::error::Error;

use super::DescribeCmd;
use crate::commands::Execute;
use crate::db::{QueryDescription, Store};

/// Result of the describe command
#[derive(Debug, Serialize)]
pub struct DescribeResult {
    pub engine: String,
    /// Whether the query text is part of the output
    #[serde(skip)]
    pub detailed: bool,
    pub queries: Vec<QueryDescription>,
}

impl Execute for DescribeCmd {
    type Output = DescribeResult;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        let all = store.describe_catalog()?;
        let detailed = !self.queries.is_empty();

        let queries = if detailed {
            let mut picked = Vec::new();
            for name in &self.queries {
                match all.iter().find(|q| &q.name == name) {
                    Some(q) => picked.push(q.clone()),
                    None => return Err(format!("Unknown query: '{}'", name).into()),
                }
            }
            picked
        } else {
            all
        };

        Ok(DescribeResult {
            engine: store.engine_name().to_string(),
            detailed,
            queries,
        })
    }
}
