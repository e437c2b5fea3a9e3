//! File-backed logging.
//!
//! The terminal is in raw mode on the alternate screen while the UI runs, so records go to
//! the file named by `GHTUI_LOG` and nowhere else.

use std::fs::OpenOptions;
use std::io;

use env_logger::{Builder, Target};

use crate::config::EnvConfig;

/// Installs the global logger. Without a log file this is a no-op and `log` macros stay
/// disabled.
pub fn init(config: &EnvConfig) -> io::Result<()> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_millis()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)
}
