use std::error::Error;

use super::FertilityCmd;
use crate::commands::Execute;
use crate::db::Store;
use crate::tools::{self, AreaMap};

impl Execute for FertilityCmd {
    type Output = AreaMap;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        Ok(tools::world_fertility(store, self.year).await?)
    }
}
