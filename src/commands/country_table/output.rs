//! Output formatting for table payloads.

use crate::output::{render_grid, Outputable};
use crate::tools::Table;

impl Outputable for Table {
    fn to_table(&self) -> String {
        let headers: Vec<&str> = self.columns.iter().map(|(_, label)| label.as_str()).collect();
        render_grid(&headers, &self.rows)
    }
}
