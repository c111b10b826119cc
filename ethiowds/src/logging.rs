//! Logger setup.
//!
//! The crate logs through the `log` facade; these helpers install a
//! `simplelog` backend for applications, demos and tests.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{Config, TestLogger, WriteLogger};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("a logger is already installed")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

/// Write log records at `level` and above to a file, truncating it.
pub fn init_file_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), LoggingError> {
    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(())
}

/// Route log output through the test harness. Safe to call from every test.
pub fn init_test_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}
