// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// file paths
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use std::path::Path;

use ::thiserror::Error;

// TODO: use `std::path::Path` for `FPath`
/// `F`ake `Path` or `F`ile `Path`
pub type FPath = String;
pub type FPaths = Vec<FPath>;
pub type FileOpenOptions = std::fs::OpenOptions;

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &std::path::Path) -> FPath {
    // `PathBuf` to `String` https://stackoverflow.com/q/37388107/471376
    (*(path.to_string_lossy())).to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &std::path::Path {
    std::path::Path::new(path)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// application errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors raised by the template subsystems.
///
/// Retention housekeeping deliberately does not appear here; it degrades to
/// skip/ignore or surfaces a plain [`std::io::Error`] to the logging
/// subsystem (see [`RetentionHandler`]).
///
/// [`RetentionHandler`]: crate::logging::retention::RetentionHandler
#[derive(Debug, Error)]
pub enum AppError {
    /// configuration file missing, unreadable, or not valid YAML
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Telegram Bot API call failed
    #[error("telegram error: {0}")]
    Telegram(String),

    /// HTTP request failed; transport error or non-2xx status
    #[error("http client error: {0}")]
    HttpClient(String),

    /// input data failed validation
    #[error("validation error: {0}")]
    Validation(String),

    /// all retry attempts were used up
    #[error("retry exhausted after {attempts} attempts: {last_error}")]
    RetryExhausted { attempts: u32, last_error: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
