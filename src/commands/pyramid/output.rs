//! Output formatting for population pyramids.

use crate::db::Value;
use crate::output::{render_grid, Outputable};
use crate::tools::PopulationPyramid;

impl Outputable for PopulationPyramid {
    fn to_table(&self) -> String {
        let rows: Vec<Vec<Value>> = self
            .items
            .iter()
            .map(|i| vec![Value::from(i.label.as_str()), i.start.clone(), i.end.clone()])
            .collect();
        render_grid(&["Age", "Male", "Female"], &rows)
    }
}
