// src/logging/mod.rs

//! Logging for _raptlib_.
//!
//! ## Overview of logging
//!
//! * [`setup_logging`] installs an [`AppLogger`] behind the [`log`] facade.
//! * An `AppLogger` writes colorized records to *stderr* and, when a log
//!   file is configured, plain records through a [`RotatingFileWriter`].
//! * A `RotatingFileWriter` rotates the active file per a [`RotationPolicy`]
//!   and hands the rotated backup paths to a retention callback.
//! * A [`RetentionHandler`] is that callback: it renames raw timestamped
//!   backups to canonical dated names and prunes canonical files older than
//!   the configured retention age.
//!
//! One writer process per log directory is assumed. The retention callback
//! runs synchronously inside the rotation event; there is no locking across
//! processes.
//!
//! [`setup_logging`]: crate::logging::logger::setup_logging
//! [`AppLogger`]: crate::logging::logger::AppLogger
//! [`RotatingFileWriter`]: crate::logging::rotation::RotatingFileWriter
//! [`RotationPolicy`]: crate::logging::rotation::RotationPolicy
//! [`RetentionHandler`]: crate::logging::retention::RetentionHandler

pub mod logger;
pub mod retention;
pub mod rotation;
