// src/runner/shutdown.rs

//! Graceful shutdown on `SIGINT`/`SIGTERM`.
//!
//! A [`GracefulShutdown`] owns an exit flag, a wakeup channel so sleeping
//! loops notice the flag promptly, and a FIFO list of cleanup callbacks run
//! once work stops. [`set_signal_handler`] wires a [`ShutdownHandle`] into
//! the process signal handler.
//!
//! [`GracefulShutdown`]: self::GracefulShutdown
//! [`ShutdownHandle`]: self::ShutdownHandle
//! [`set_signal_handler`]: self::set_signal_handler

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ::crossbeam_channel::{bounded, Receiver, Sender};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Run at shutdown, in registration order.
pub type CleanupCallback = Box<dyn FnOnce() + Send>;

/// Cloneable trigger side of a [`GracefulShutdown`]; safe to move into a
/// signal handler or another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    exit: Arc<AtomicBool>,
    wake_tx: Sender<()>,
}

impl ShutdownHandle {
    /// Request shutdown. Idempotent.
    pub fn request_exit(&self) {
        self.exit.store(true, Ordering::SeqCst);
        // capacity-1 channel; a second send just finds it full
        let _ = self.wake_tx.try_send(());
    }

    pub fn should_exit(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }
}

/// Shutdown coordinator for one run mode.
pub struct GracefulShutdown {
    exit: Arc<AtomicBool>,
    wake_tx: Sender<()>,
    wake_rx: Receiver<()>,
    cleanups: Vec<CleanupCallback>,
}

impl Default for GracefulShutdown {
    fn default() -> GracefulShutdown {
        GracefulShutdown::new()
    }
}

impl GracefulShutdown {
    pub fn new() -> GracefulShutdown {
        let (wake_tx, wake_rx) = bounded::<()>(1);

        GracefulShutdown {
            exit: Arc::new(AtomicBool::new(false)),
            wake_tx,
            wake_rx,
            cleanups: Vec::new(),
        }
    }

    /// Trigger side for signal handlers and worker threads.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            exit: Arc::clone(&self.exit),
            wake_tx: self.wake_tx.clone(),
        }
    }

    pub fn should_exit(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }

    /// Register a callback for the cleanup phase.
    pub fn register_cleanup<F>(
        &mut self,
        callback: F,
    ) where
        F: FnOnce() + Send + 'static,
    {
        self.cleanups.push(Box::new(callback));
    }

    /// Sleep up to `timeout`, returning early (with `true`) when shutdown is
    /// requested.
    pub fn wait(
        &self,
        timeout: Duration,
    ) -> bool {
        if self.should_exit() {
            return true;
        }
        match self.wake_rx.recv_timeout(timeout) {
            Ok(_) => true,
            Err(_timeout_or_disconnect) => self.should_exit(),
        }
    }

    /// Run registered cleanup callbacks in registration order. A callback
    /// panic is contained and logged; remaining callbacks still run.
    pub fn run_cleanups(&mut self) {
        defn!("({} callbacks)", self.cleanups.len());
        for callback in self.cleanups.drain(..) {
            if catch_unwind(AssertUnwindSafe(callback)).is_err() {
                log::error!("Cleanup callback failed");
            }
        }
        defx!();
    }
}

/// Set a process signal handler that trips `handle` on `SIGINT`/`SIGTERM`.
pub fn set_signal_handler(handle: ShutdownHandle) -> anyhow::Result<(), ctrlc::Error> {
    defn!();
    ctrlc::set_handler(move || {
        log::info!("Received interrupt, initiating graceful shutdown");
        handle.request_exit();
    })?;
    log::debug!("Signal handlers registered (SIGINT, SIGTERM)");
    defx!();

    Ok(())
}
