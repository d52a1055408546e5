//! Terminal logger setup for the command-line tool

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use crate::io::error::Result;

/// Map the `-v` count and quiet flag to a log level
///
/// Quiet wins over verbosity; otherwise warnings are shown by default and each
/// `-v` adds a level up to trace.
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install a stderr logger for the process
///
/// # Errors
///
/// Returns `Logger` if a global logger is already installed
pub fn init_logging(verbosity: u8, quiet: bool) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    TermLogger::init(
        level_for(verbosity, quiet),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    Ok(())
}
