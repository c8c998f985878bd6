//! Output formatting for series payloads.

use crate::output::{render_grid, Outputable};
use crate::tools::Series;

impl Outputable for Series {
    fn to_table(&self) -> String {
        if self.rows.is_empty() {
            return format!("{}: no data", self.title);
        }
        let headers: Vec<&str> = self.cols.iter().map(|(_, label)| label.as_str()).collect();
        format!("{}\n\n{}", self.title, render_grid(&headers, &self.rows))
    }
}
