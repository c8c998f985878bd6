mod execute;
mod output;

use clap::Args;

/// World fertility map for one year
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography fertility --year 2021
  demography fertility -y 1960 --format json")]
pub struct FertilityCmd {
    /// Year (1950-2023)
    #[arg(short, long, value_parser = crate::commands::parse_year)]
    pub year: i64,
}
