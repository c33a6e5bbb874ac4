//! CLI argument parsing, logging setup and command dispatch

use std::io::Write;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::commands;

/// darktable Importer - Migrate a Lightroom catalogue into darktable
#[derive(Parser, Debug)]
#[command(name = "darktable-importer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    import: commands::import::ImportArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level
    #[arg(long, value_name = "LEVEL", value_enum, default_value_t = Verbosity::Info)]
    verbosity: Verbosity,
}

/// Log levels accepted by `--verbosity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Verbosity {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<Verbosity> for LevelFilter {
    fn from(verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Warning => LevelFilter::Warn,
            Verbosity::Error => LevelFilter::Error,
        }
    }
}

impl Cli {
    /// Execute the import
    pub fn execute(self) -> Result<()> {
        init_logging(self.verbosity);
        commands::import::execute(self.import, &self.color)
    }
}

fn init_logging(verbosity: Verbosity) {
    // Tests may initialise more than once
    let _ = env_logger::Builder::new()
        .filter_level(verbosity.into())
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .try_init();
}
