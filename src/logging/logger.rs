// src/logging/logger.rs

//! The [`log`] facade backend for the template.
//!
//! [`setup_logging`] builds an [`AppLogger`] from an explicit
//! [`LoggingConfig`], constructed once at process start and not mutated
//! afterwards, and installs it behind the facade. Records go colorized to
//! *stderr* and, when a log file is configured, plain to a
//! [`RotatingFileWriter`] wired to a [`RetentionHandler`].
//!
//! [`AppLogger`]: self::AppLogger
//! [`setup_logging`]: self::setup_logging
//! [`LoggingConfig`]: crate::cfg::config::LoggingConfig
//! [`RotatingFileWriter`]: crate::logging::rotation::RotatingFileWriter
//! [`RetentionHandler`]: crate::logging::retention::RetentionHandler

use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

use ::chrono::Local;
use ::log::{Level, LevelFilter, Log, Metadata, Record};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cfg::config::LoggingConfig;
use crate::common::{AppError, AppResult, FPath};
use crate::debug::printers::e_wrn;
use crate::logging::retention::RetentionHandler;
use crate::logging::rotation::RotatingFileWriter;

/// `strftime` pattern for the record timestamp field.
const RECORD_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Render one record as
/// `YYYY-MM-DD HH:MM:SS | LEVEL    | target:line | message`.
pub fn format_record(record: &Record) -> String {
    format!(
        "{} | {:<8} | {}:{} | {}\n",
        Local::now().format(RECORD_TIME_PATTERN),
        record.level(),
        record.target(),
        record.line().unwrap_or(0),
        record.args(),
    )
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug => Color::Cyan,
        Level::Trace => Color::Magenta,
    }
}

/// Console + optional rotating-file logger.
pub struct AppLogger {
    level: LevelFilter,
    color_choice: ColorChoice,
    file: Option<Mutex<RotatingFileWriter>>,
}

impl AppLogger {
    fn write_console(
        &self,
        record: &Record,
    ) {
        let mut out = StandardStream::stderr(self.color_choice);
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(level_color(record.level())));
        let _ = out.set_color(&spec);
        let _ = write!(out, "{:<8}", record.level());
        let _ = out.reset();
        let _ = writeln!(
            out,
            " {} | {}:{} | {}",
            Local::now().format(RECORD_TIME_PATTERN),
            record.target(),
            record.line().unwrap_or(0),
            record.args(),
        );
    }
}

impl Log for AppLogger {
    fn enabled(
        &self,
        metadata: &Metadata,
    ) -> bool {
        metadata.level() <= self.level
    }

    fn log(
        &self,
        record: &Record,
    ) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.write_console(record);
        if let Some(file) = self.file.as_ref() {
            let line = format_record(record);
            let mut writer = match file.lock() {
                Ok(val) => val,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Err(err) = writer.write_record(line.as_bytes()) {
                // the file sink must not take down the process
                e_wrn!("log file write failed: {}", err);
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.as_ref() {
            if let Ok(mut writer) = file.lock() {
                let _ = writer.flush();
            }
        }
    }
}

/// Build and install the process logger.
///
/// `level_override` (e.g. from `--log-level` or `--verbose`) wins over
/// `config.level`; an unrecognized level name falls back to `INFO`.
/// With `log_file` set, the file sink rotates per the resolved
/// [`RotationPolicy`] and retention housekeeping runs on each rotation.
///
/// Errors if a logger was already installed for this process.
///
/// [`RotationPolicy`]: crate::logging::rotation::RotationPolicy
pub fn setup_logging(
    config: &LoggingConfig,
    log_file: Option<&FPath>,
    level_override: Option<&str>,
) -> AppResult<()> {
    defn!("({:?}, {:?})", log_file, level_override);
    let level_name: &str = level_override.unwrap_or(&config.level);
    let level = LevelFilter::from_str(level_name).unwrap_or(LevelFilter::Info);
    let file = match log_file {
        Some(path) => {
            let handler = RetentionHandler::with_max_age_days(config.retention_days, path);
            defo!(
                "file sink {:?}, rotation {:?}, retention {} days",
                path,
                config.rotation_policy,
                handler.max_age_days(),
            );
            let writer = RotatingFileWriter::new(
                path,
                config.rotation_policy,
                Some(handler.into_callback()),
            )?;
            Some(Mutex::new(writer))
        }
        None => None,
    };
    let logger = AppLogger {
        level,
        color_choice: ColorChoice::Auto,
        file,
    };
    log::set_boxed_logger(Box::new(logger))
        .map_err(|err| AppError::Configuration(format!("logger already installed: {}", err)))?;
    log::set_max_level(level);
    log::info!("Logger initialized: level={}, file={:?}", level, log_file);
    defx!();

    Ok(())
}
