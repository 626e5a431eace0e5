use std::io;

use anyhow::Context;
use tracing::info;

use chess_rules_engine::config::EngineConfig;
use chess_rules_engine::shell::Shell;

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the shell, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = EngineConfig::from_env().context("invalid engine configuration")?;
    info!(depth = config.search_depth, "chess shell ready");

    let mut shell = Shell::new(config);
    let stdin = io::stdin();
    shell
        .run(stdin.lock(), io::stdout())
        .context("shell input/output failed")?;

    Ok(())
}
