// src/runner/batch.rs

//! Batch mode: run one job and exit.
//!
//! Telegram is notified at start, completion, and failure. The job body is
//! template scaffolding; replace [`run_batch_job`] with real work.
//!
//! [`run_batch_job`]: self::run_batch_job

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::cfg::config::Settings;
use crate::common::AppResult;
use crate::notify::telegram::TelegramNotifier;

/// The job itself.
///
/// TODO: replace this template body with the application's batch work
fn run_batch_job(_settings: &Settings) -> AppResult<()> {
    log::warn!("Batch runner is a template - implement your logic");

    Ok(())
}

/// Run the one-shot batch job with notifications.
pub fn run_batch(settings: &Settings) -> AppResult<()> {
    defn!();
    log::info!("Batch mode started");
    log::info!("App: {} v{}", settings.app.name, settings.app.version);

    let notifier = TelegramNotifier::new(&settings.telegram);
    notifier.send_message(&format!(
        "▶️ **{}** batch started\nVersion: {}",
        settings.app.name, settings.app.version,
    ));

    match run_batch_job(settings) {
        Ok(_) => {
            log::info!("Batch mode completed");
            notifier.send_message(&format!("✅ **{}** batch completed", settings.app.name));
            defx!("ok");
            Ok(())
        }
        Err(err) => {
            log::error!("Batch failed: {}", err);
            notifier.send_error(&err, "Batch mode failed");
            defx!("err");
            Err(err)
        }
    }
}
