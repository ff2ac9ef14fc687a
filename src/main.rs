use clap::Parser;
use tracing_subscriber::EnvFilter;
use trip_analyzer::cli::{run, Cli};

/// Initialize tracing output when verbose mode is requested.
fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)?;
    Ok(())
}
