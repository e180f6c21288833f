//! Logger initialization.
//!
//! Logs go to stderr so listings on stdout stay pipeable.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and the provided `level` then overrides it for
/// this crate, so `--log-level` always wins for `vanish` itself while
/// `RUST_LOG` can still tune dependencies.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Debug output for vanish only
/// vanish --log-level debug servers --country uk
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=reqwest=debug vanish update
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // hyper's target prefix also covers hyper_util
    builder.filter_module("reqwest", LevelFilter::Info.min(level));
    builder.filter_module("hyper", LevelFilter::Info.min(level));
    builder.filter_module("vanish", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = serde_json::json!({
                    "ts": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    "level": record.level().as_str(),
                    "target": record.target(),
                    "msg": record.args().to_string(),
                });
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {}: {}",
                    paint_level(record.level()),
                    record.target().dimmed(),
                    record.args()
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}

fn paint_level(level: Level) -> ColoredString {
    let label = format!("{:<5}", level);
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug | Level::Trace => label.normal(),
    }
}
