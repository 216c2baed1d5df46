use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self, MakeWriter},
    prelude::*,
};

/// Target prefix of every event emitted by the engine and this binary.
const ENGINE_TARGET: &str = "dbanneal";

/// Level for engine events.
///
/// Phase boundaries are `info!`, per-site precompute values and per-cycle
/// summaries are `debug!`, and individual accepted hops are `trace!`, so
/// `-vvv` is the only setting that shows the hop stream.
fn engine_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Dependencies only ever reach the console with warnings.
fn console_filter(verbosity: u8, quiet: bool) -> Targets {
    let default = if quiet {
        LevelFilter::OFF
    } else {
        LevelFilter::WARN
    };
    Targets::new()
        .with_target(ENGINE_TARGET, engine_level(verbosity, quiet))
        .with_default(default)
}

/// A log file always records at least the phase boundaries of the run,
/// `--quiet` included.
fn file_filter(verbosity: u8) -> Targets {
    Targets::new()
        .with_target(
            ENGINE_TARGET,
            engine_level(verbosity, false).max(LevelFilter::INFO),
        )
        .with_default(LevelFilter::WARN)
}

fn build_subscriber<W>(
    verbosity: u8,
    quiet: bool,
    console: W,
    log_file: Option<File>,
) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let console_layer = fmt::layer()
        .with_writer(console)
        .with_target(false)
        .compact()
        .with_filter(console_filter(verbosity, quiet));

    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_filter(file_filter(verbosity))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
}

/// Installs the global subscriber: a compact stderr layer plus an optional
/// plain-text file layer.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let file = log_file
        .map(|path| File::create(&path))
        .transpose()
        .map_err(CliError::Io)?;

    build_subscriber(verbosity, quiet, std::io::stderr, file).init();
    Ok(())
}
