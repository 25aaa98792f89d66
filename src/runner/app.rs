// src/runner/app.rs

//! App mode: the long-running daemon.
//!
//! The loop body here is template scaffolding; replace it with real work.
//! The shutdown polling and cleanup sequencing are the part to keep.

use std::time::Duration;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::cfg::config::Settings;
use crate::common::AppResult;
use crate::runner::shutdown::GracefulShutdown;

/// Pause between template work iterations. The loop wakes early when
/// shutdown is requested.
const APP_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Run the daemon until shutdown is requested, then run cleanup callbacks.
pub fn run_app(
    settings: &Settings,
    shutdown: &mut GracefulShutdown,
) -> AppResult<()> {
    defn!();
    log::info!("App mode started");
    log::info!("App: {} v{}", settings.app.name, settings.app.version);
    log::info!("App running (press Ctrl+C to stop)");

    // TODO: replace this template loop with the application's main work
    let mut iteration: u64 = 0;
    while !shutdown.should_exit() {
        iteration += 1;
        log::debug!("app iteration {}", iteration);
        if shutdown.wait(APP_TICK_INTERVAL) {
            break;
        }
    }

    log::info!("Running cleanup callbacks");
    shutdown.run_cleanups();
    log::info!("App mode stopped");
    defx!();

    Ok(())
}
