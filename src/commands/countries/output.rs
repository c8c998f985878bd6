//! Output formatting for countries command results.

use super::execute::CountryList;
use crate::db::Value;
use crate::output::{render_grid, Outputable};

impl Outputable for CountryList {
    fn to_table(&self) -> String {
        if self.countries.is_empty() {
            return "No countries loaded.".to_string();
        }
        let rows: Vec<Vec<Value>> = self
            .countries
            .iter()
            .map(|c| vec![Value::from(c.key.as_str()), Value::from(c.label.as_str())])
            .collect();
        format!("Countries ({}):\n\n{}", rows.len(), render_grid(&["Key", "Name"], &rows))
    }
}
