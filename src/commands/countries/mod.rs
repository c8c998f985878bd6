mod execute;
mod output;

use clap::Args;

/// List country keys and names
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography countries              # Alpha-3 key and name of every country
  demography countries --format json")]
pub struct CountriesCmd {}
