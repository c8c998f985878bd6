mod execute;
mod output;

use clap::Args;

/// List the loaded catalog queries with their parameters
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography describe                        # List every catalog query
  demography describe dem_by_year            # Show one query with its text
  demography describe fert_by_year fert_by_country")]
pub struct DescribeCmd {
    /// Query name(s) to describe (if empty, lists all)
    pub queries: Vec<String>,
}
