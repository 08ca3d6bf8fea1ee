//! Yani entry point.

use yani::cli::Cli;
use yani::{ConfigLoader, Logger};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args(std::env::args_os());

    let loaded = ConfigLoader::must_load(cli.config.as_deref());
    let config = &loaded.config;

    let logger = Logger::new(config.env);
    logger.init()?;

    tracing::debug!(
        path = %loaded.location.path.display(),
        source = %loaded.location.source,
        overridden = ?loaded.overridden,
        "configuration loaded"
    );
    tracing::info!(env = %config.env, "starting app");

    Ok(())
}
