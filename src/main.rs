//! Git Activity Charts
//!
//! Command-line tool that charts when work happens across Git repositories.

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gitactivity::cli::Cli;

#[cfg(feature = "dev")]
const DEFAULT_LOG_LEVEL: Option<&str> = Some("debug");
#[cfg(not(feature = "dev"))]
const DEFAULT_LOG_LEVEL: Option<&str> = None;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = DEFAULT_LOG_LEVEL.unwrap_or(cli.log_level.as_str());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config().context("Invalid arguments")?;

    let rt = Runtime::new().context("Failed to start async runtime")?;
    let written = rt
        .block_on(gitactivity::run(&config))
        .context("Analysis failed")?;

    info!(files = written.len(), "Done");
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}
