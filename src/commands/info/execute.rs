use std::error::Error;

use super::InfoCmd;
use crate::commands::Execute;
use crate::db::Store;
use crate::tools::{self, InfoBox};

impl Execute for InfoCmd {
    type Output = InfoBox;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        Ok(tools::country_info(store, &self.country).await?)
    }
}
