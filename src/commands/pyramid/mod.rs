mod execute;
mod output;

use clap::Args;

use crate::dataset::CountryKey;

/// Population pyramid for one country and year
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography pyramid --country ESP --year 2020
  demography pyramid -c jpn -y 1990 --format json")]
pub struct PyramidCmd {
    /// ISO-3166 alpha-3 country code
    #[arg(short, long)]
    pub country: CountryKey,

    /// Year (1950-2023)
    #[arg(short, long, value_parser = crate::commands::parse_year)]
    pub year: i64,
}
