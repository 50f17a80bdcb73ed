use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{Config as LogConfig, WriteLogger};

use grid_snake::app::App;
use grid_snake::config::Config;

fn main() -> Result<()> {
    let config = Config::parse();

    // The terminal is taken over by the game, so logs go to a file
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("Failed to create log file {}", config.log_file.display()))?;
    WriteLogger::init(config.log_level.into(), LogConfig::default(), log_file)
        .context("Failed to initialize logger")?;
    info!("Starting grid_snake {}", env!("CARGO_PKG_VERSION"));

    let mut app = App::new(&config)?;
    // The app restores the terminal before handing back any error
    app.run()?;

    info!("Exited cleanly");
    Ok(())
}
