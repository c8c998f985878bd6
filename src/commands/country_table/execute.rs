use std::error::Error;

use super::CountryTableCmd;
use crate::commands::Execute;
use crate::db::Store;
use crate::tools::{self, Table};

impl Execute for CountryTableCmd {
    type Output = Table;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        Ok(tools::country_table(store).await?)
    }
}
