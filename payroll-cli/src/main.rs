use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use payroll_cli::{app, cli::Cli, config::AppConfig, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    debug!(sweep = ?config.sweep, "configuration ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app::run(&cli.command, &config, &mut out)?;
    out.flush()?;

    Ok(())
}
