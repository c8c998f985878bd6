mod execute;
mod output;

use clap::Args;

use crate::dataset::CountryKey;

/// Population by age group of one country over time
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography series --country ESP
  demography series -c ita --format json")]
pub struct SeriesCmd {
    /// ISO-3166 alpha-3 country code
    #[arg(short, long)]
    pub country: CountryKey,
}
