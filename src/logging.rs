//! File logging for the terminal binary.
//!
//! The terminal is in raw mode while the game runs, so records go to a file
//! through a log4rs appender instead of stderr.

use std::str::FromStr;

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

pub const DEFAULT_LOG_PATH: &str = "tui-match3.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub path: String,
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_LOG_PATH.to_string(),
            level: LevelFilter::Info,
        }
    }
}

impl LogConfig {
    /// `MATCH3_LOG_PATH` and `MATCH3_LOG_LEVEL`; unknown levels keep the default.
    pub fn from_env() -> Self {
        use std::env;

        let path = env::var("MATCH3_LOG_PATH")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());
        let level = env::var("MATCH3_LOG_LEVEL")
            .ok()
            .and_then(|s| LevelFilter::from_str(s.trim()).ok())
            .unwrap_or(LevelFilter::Info);

        Self { path, level }
    }
}

/// Install the global logger. `LevelFilter::Off` skips installation.
pub fn init_log(config: &LogConfig) -> Result<()> {
    if config.level == LevelFilter::Off {
        return Ok(());
    }

    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(&config.path)
        .with_context(|| format!("cannot open log file {}", config.path))?;

    let log_config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(config.level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(config.level))
        .context("invalid log configuration")?;

    log4rs::init_config(log_config).context("logger already installed")?;
    Ok(())
}
