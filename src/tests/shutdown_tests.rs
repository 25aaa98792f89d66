// src/tests/shutdown_tests.rs

//! tests for `shutdown.rs` functions

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::runner::shutdown::GracefulShutdown;

#[test]
fn test_flag_starts_clear() {
    let shutdown = GracefulShutdown::new();
    assert!(!shutdown.should_exit());
    assert!(!shutdown.handle().should_exit());
}

#[test]
fn test_request_exit_sets_flag() {
    let shutdown = GracefulShutdown::new();
    let handle = shutdown.handle();
    handle.request_exit();
    // repeated requests are harmless
    handle.request_exit();

    assert!(shutdown.should_exit());
    assert!(handle.should_exit());
}

#[test]
fn test_wait_returns_early_on_exit() {
    let shutdown = GracefulShutdown::new();
    let handle = shutdown.handle();
    let waiter = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        handle.request_exit();
    });
    let start = Instant::now();
    let interrupted = shutdown.wait(Duration::from_secs(10));
    waiter.join().unwrap();

    assert!(interrupted);
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "wait must not run out the full timeout",
    );
}

#[test]
fn test_wait_times_out_without_exit() {
    let shutdown = GracefulShutdown::new();
    let interrupted = shutdown.wait(Duration::from_millis(10));

    assert!(!interrupted);
}

#[test]
fn test_cleanups_run_in_registration_order() {
    let mut shutdown = GracefulShutdown::new();
    let order: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    for tag in 1..=3u8 {
        let order = Arc::clone(&order);
        shutdown.register_cleanup(move || {
            order.lock().unwrap().push(tag);
        });
    }
    shutdown.run_cleanups();

    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
    // a second run finds nothing left to do
    shutdown.run_cleanups();
    assert_eq!(*order.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_cleanup_panic_is_contained() {
    let mut shutdown = GracefulShutdown::new();
    let ran: Arc<Mutex<bool>> = Arc::new(Mutex::new(false));
    shutdown.register_cleanup(|| panic!("cleanup gone wrong"));
    {
        let ran = Arc::clone(&ran);
        shutdown.register_cleanup(move || {
            *ran.lock().unwrap() = true;
        });
    }
    shutdown.run_cleanups();

    assert!(*ran.lock().unwrap(), "later callbacks must still run");
}
