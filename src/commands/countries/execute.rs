use serde::Serialize;
use std::error::Error;

use super::CountriesCmd;
use crate::commands::Execute;
use crate::db::Store;
use crate::tools;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryEntry {
    pub key: String,
    pub label: String,
}

/// Result of the countries command
#[derive(Debug, Default, Serialize)]
pub struct CountryList {
    pub countries: Vec<CountryEntry>,
}

impl Execute for CountriesCmd {
    type Output = CountryList;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        let countries = tools::country_keys(store)
            .await?
            .into_iter()
            .map(|(key, label)| CountryEntry { key, label })
            .collect();
        Ok(CountryList { countries })
    }
}
