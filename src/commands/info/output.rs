//! Output formatting for info boxes.

use crate::output::Outputable;
use crate::tools::InfoBox;

impl Outputable for InfoBox {
    fn to_table(&self) -> String {
        if self.row.iter().all(|v| v.is_null()) {
            return "No matching country.".to_string();
        }
        let width = self
            .columns
            .iter()
            .map(|(_, label)| label.chars().count())
            .max()
            .unwrap_or(0);
        self.columns
            .iter()
            .zip(&self.row)
            .map(|((_, label), value)| format!("{:<width$}  {}", label, value, width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
