mod execute;
mod output;

use clap::Args;

/// Show every country with all its columns
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography country-table
  demography country-table --format toon")]
pub struct CountryTableCmd {}
