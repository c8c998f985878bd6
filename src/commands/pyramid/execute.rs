use std::error::Error;

use super::PyramidCmd;
use crate::commands::Execute;
use crate::db::Store;
use crate::tools::{self, PopulationPyramid};

impl Execute for PyramidCmd {
    type Output = PopulationPyramid;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>> {
        Ok(tools::population_pyramid(store, &self.country, self.year).await?)
    }
}
