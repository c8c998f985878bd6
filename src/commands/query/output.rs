//! Output formatting for query command results.

use super::execute::QueryResult;
use crate::output::{render_grid, Outputable};

impl Outputable for QueryResult {
    fn to_table(&self) -> String {
        if self.rows.is_empty() {
            return format!("{}: no rows", self.name);
        }
        format!(
            "{} ({} rows)\n\n{}",
            self.name,
            self.rows.len(),
            render_grid(&self.columns, &self.rows)
        )
    }
}
