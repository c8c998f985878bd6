use std::error::Error;

use super::FertilitySeriesCmd;
use crate::commands::Execute;
use crate::db::Store;
use crate::tools::{self, Series};

impl Execute for FertilitySeriesCmd {
    type Output = Series;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        Ok(tools::fertility_over_time(store, &self.country).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CountryKey;
    use crate::db::Value;

    crate::execute_test! {
        test_name: test_fertility_series_for_spain,
        cmd: FertilitySeriesCmd { country: CountryKey::new("esp") },
        assertions: |result| {
            assert_eq!(result.rows, vec![
                vec![Value::Int(2020), Value::Float(1.2)],
                vec![Value::Int(2021), Value::Float(1.19)],
            ]);
        },
    }

    crate::execute_test! {
        test_name: test_fertility_series_unknown_country,
        cmd: FertilitySeriesCmd { country: CountryKey::new("JPN") },
        assertions: |result| {
            assert!(result.rows.is_empty());
        },
    }

    crate::execute_empty_db_test! {
        cmd: FertilitySeriesCmd { country: CountryKey::new("ESP") },
    }
}
