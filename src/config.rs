//! Environment configuration.

use std::env;

use log::LevelFilter;

pub const ENV_LOG_FILE: &str = "GHTUI_LOG";
pub const ENV_LOG_LEVEL: &str = "GHTUI_LOG_LEVEL";
pub const ENV_WRITE_LOG: &str = "GHTUI_WRITE_LOG";

#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// File receiving `log` records. Logging is off without one.
    pub log_file: Option<String>,
    pub log_level: LevelFilter,
    /// File receiving a copy of every byte written to the terminal.
    pub write_log: Option<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: LevelFilter::Info,
            write_log: None,
        }
    }
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            log_file: env_string_opt(ENV_LOG_FILE),
            log_level: env_string_opt(ENV_LOG_LEVEL)
                .and_then(|value| value.parse().ok())
                .unwrap_or(LevelFilter::Info),
            write_log: env_string_opt(ENV_WRITE_LOG),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
