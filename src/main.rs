use clap::Parser;
use tracing_subscriber::EnvFilter;

use demography::cli::Args;
use demography::config::ConfigFile;

/// Log to stderr so command output on stdout stays parseable.
///
/// `RUST_LOG` wins; otherwise warnings, or info with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = ConfigFile::resolve(args.config.as_deref())?;
    let mut store = config.build_store()?;
    if args.verbose {
        store = store.with_verbose(true);
    }

    store.setup().await?;
    let result = args.command.run(&store, args.format).await;
    let disposed = store.dispose().await;

    let output = result?;
    disposed?;
    println!("{}", output);
    Ok(())
}
