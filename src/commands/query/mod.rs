mod cli_tests;
mod execute;
mod output;

use clap::Args;

use crate::db::QueryArg;

/// Run any catalog query by name
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  demography query countries_all
  demography query dem_by_year -a year=2020 -a type=t
  demography query get_country_by_fuzzy_name -a name=spain")]
pub struct QueryCmd {
    /// Catalog query name
    pub name: String,

    /// Query argument as key=value (repeatable). Integers and booleans are
    /// passed as such; anything else is text.
    #[arg(short = 'a', long = "arg", value_parser = parse_arg)]
    pub args: Vec<(String, QueryArg)>,
}

/// Parse `key=value`, coercing the value to an integer or boolean when it
/// reads as one.
pub(crate) fn parse_arg(s: &str) -> Result<(String, QueryArg), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing argument name in '{}'", s));
    }

    let arg = if let Ok(i) = value.parse::<i64>() {
        QueryArg::Integer(i)
    } else if let Ok(b) = value.parse::<bool>() {
        QueryArg::Boolean(b)
    } else {
        QueryArg::Text(value.to_string())
    };
    Ok((key.to_string(), arg))
}
