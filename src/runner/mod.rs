// src/runner/mod.rs

//! Run modes for _raptlib_.
//!
//! ## Overview of runners
//!
//! * [`run_app`] is the long-running daemon: a work loop polling a
//!   [`GracefulShutdown`] until an interrupt arrives, then cleanup.
//! * [`run_batch`] is the one-shot job with Telegram notifications at
//!   start, completion, and failure.
//! * [`run_api`] serves the sample HTTP API until shutdown.
//!
//! All three take the [`Settings`] object loaded by the binary driver;
//! nothing here reads configuration ambiently.
//!
//! [`run_app`]: crate::runner::app::run_app
//! [`run_batch`]: crate::runner::batch::run_batch
//! [`run_api`]: crate::runner::api::run_api
//! [`GracefulShutdown`]: crate::runner::shutdown::GracefulShutdown
//! [`Settings`]: crate::cfg::config::Settings

pub mod api;
pub mod app;
pub mod batch;
pub mod shutdown;
