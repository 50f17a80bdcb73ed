use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SoundMode {
    /// Ring the terminal bell
    Bell,
    /// Play a short tone (needs the `audio` feature)
    Tone,
    /// No sound
    Mute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a 20x20 grid, in the terminal")]
pub struct Config {
    /// Seed for food placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sound played when food is eaten
    #[arg(long, value_enum, default_value = "bell")]
    pub sound: SoundMode,

    /// File the log is written to
    #[arg(long, default_value = "grid_snake.log")]
    pub log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Start playing without the controls screen
    #[arg(long)]
    pub no_intro: bool,
}
