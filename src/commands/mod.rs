//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An [`Execute`] impl producing an [`Outputable`] result
//! - Output formatting and tests next to it

mod countries;
mod country_table;
mod describe;
mod fertility;
mod fertility_series;
mod info;
mod pyramid;
mod query;
mod series;

pub use countries::CountriesCmd;
pub use country_table::CountryTableCmd;
pub use describe::DescribeCmd;
pub use fertility::FertilityCmd;
pub use fertility_series::FertilitySeriesCmd;
pub use info::InfoCmd;
pub use pyramid::PyramidCmd;
pub use query::QueryCmd;
pub use series::SeriesCmd;

use clap::Subcommand;
use std::error::Error;

use crate::db::Store;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
///
/// The store is set up before `execute` runs and disposed after it returns.
#[allow(async_fn_in_trait)]
pub trait Execute {
    type Output: Outputable;

    async fn execute(self, store: &Store) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the loaded catalog queries with their parameters
    Describe(DescribeCmd),

    /// Run any catalog query by name
    Query(QueryCmd),

    /// List country keys and names
    Countries(CountriesCmd),

    /// Show every country with all its columns
    CountryTable(CountryTableCmd),

    /// Population pyramid for one country and year
    Pyramid(PyramidCmd),

    /// World fertility map for one year
    Fertility(FertilityCmd),

    /// Fertility rate of one country over time
    FertilitySeries(FertilitySeriesCmd),

    /// Population by age group of one country over time
    Series(SeriesCmd),

    /// Details of one country, matched by name or ISO code
    Info(InfoCmd),
}

async fn run_cmd<C: Execute>(
    cmd: C,
    store: &Store,
    format: OutputFormat,
) -> Result<String, Box<dyn Error>> {
    let result = cmd.execute(store).await?;
    Ok(result.format(format))
}

impl Command {
    /// Execute the command and return formatted output
    pub async fn run(self, store: &Store, format: OutputFormat) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Describe(cmd) => run_cmd(cmd, store, format).await,
            Command::Query(cmd) => run_cmd(cmd, store, format).await,
            Command::Countries(cmd) => run_cmd(cmd, store, format).await,
            Command::CountryTable(cmd) => run_cmd(cmd, store, format).await,
            Command::Pyramid(cmd) => run_cmd(cmd, store, format).await,
            Command::Fertility(cmd) => run_cmd(cmd, store, format).await,
            Command::FertilitySeries(cmd) => run_cmd(cmd, store, format).await,
            Command::Series(cmd) => run_cmd(cmd, store, format).await,
            Command::Info(cmd) => run_cmd(cmd, store, format).await,
        }
    }
}

/// Parse a year within the dataset's range.
pub(crate) fn parse_year(s: &str) -> Result<i64, String> {
    use crate::dataset::{MAX_YEAR, MIN_YEAR};

    let year: i64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a year", s))?;
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(format!("year must be between {} and {}", MIN_YEAR, MAX_YEAR))
    }
}
