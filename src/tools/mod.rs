//! Visualization tools over the demography dataset.
//!
//! Each tool runs one or two catalog queries through a [`Store`](crate::db::Store)
//! and returns a serde payload tagged with the visualization it feeds.

mod countries;
mod demography;
mod fertility;
pub mod payload;

pub use countries::{country_info, country_keys, country_table};
pub use demography::{demography_over_time, population_pyramid};
pub use fertility::{fertility_over_time, world_fertility};
pub use payload::{
    AreaItem, AreaMap, ClickAction, ColumnInfo, InfoBox, PopulationPyramid, PyramidItem, Series,
    Table,
};
