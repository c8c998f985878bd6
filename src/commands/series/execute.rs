use std::error::Error;

use super::SeriesCmd;
use crate::commands::Execute;
use crate::db::Store;
use crate::tools::{self, Series};

impl Execute for SeriesCmd {
    type Output = Series;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        Ok(tools::demography_over_time(store, &self.country).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CountryKey;
    use crate::db::Value;

    crate::execute_test! {
        test_name: test_series_for_spain,
        cmd: SeriesCmd { country: CountryKey::new("ESP") },
        assertions: |result| {
            assert_eq!(result.rows.len(), 2);
            assert_eq!(result.rows[0][0], Value::Int(2022));
            assert_eq!(result.y_col_title, "Inhabitants");
        },
    }

    crate::execute_test! {
        test_name: test_series_keeps_missing_values_null,
        cmd: SeriesCmd { country: CountryKey::new("ITA") },
        assertions: |result| {
            assert_eq!(result.rows.len(), 1);
            assert_eq!(result.rows[0][5], Value::Null);
        },
    }

    crate::execute_empty_db_test! {
        cmd: SeriesCmd { country: CountryKey::new("ESP") },
    }
}
