mod execute;

use clap::Args;

use crate::dataset::CountryKey;

/// Fertility rate of one country over time
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography fertility-series --country ESP")]
pub struct FertilitySeriesCmd {
    /// ISO-3166 alpha-3 country code
    #[arg(short, long)]
    pub country: CountryKey,
}
