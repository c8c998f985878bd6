mod execute;
mod output;

use clap::Args;

use crate::dataset::CountryKey;

/// Details of one country, matched by name or ISO code
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography info --country ESP
  demography info --country spain
  demography info -c es --format toon")]
pub struct InfoCmd {
    /// Country name, alpha-2 or alpha-3 code (case-insensitive)
    #[arg(short, long)]
    pub country: CountryKey,
}
