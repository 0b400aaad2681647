use anyhow::Context;
use bikeshare_processor::cli::{run, Cli};
use bikeshare_processor::config::PipelineSettings;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings =
        PipelineSettings::load(cli.config.as_deref()).context("failed to load configuration")?;
    init_logging(&settings.log_level, cli.verbose)?;

    run(cli, settings).await?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level; `--verbose` raises the default to debug.
fn init_logging(level: &str, verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("invalid log level '{}'", default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
