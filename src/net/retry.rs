// src/net/retry.rs

//! Retry with exponential backoff.
//!
//! The wait doubles after each failed attempt, capped at a maximum; after
//! the final failure the last error is wrapped in
//! [`AppError::RetryExhausted`].
//!
//! [`AppError::RetryExhausted`]: crate::common::AppError::RetryExhausted

use std::thread;
use std::time::Duration;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::common::{AppError, AppResult};

pub const RETRY_ATTEMPTS_DEFAULT: u32 = 3;
pub const RETRY_WAIT_DEFAULT: Duration = Duration::from_secs(1);
pub const RETRY_WAIT_MAX_DEFAULT: Duration = Duration::from_secs(10);

/// Call `operation` up to `max_attempts` times.
///
/// Sleeps `initial_wait` after the first failure, doubling up to
/// `max_wait`. `max_attempts` of zero is treated as one attempt.
pub fn with_retry<T, E, F>(
    max_attempts: u32,
    initial_wait: Duration,
    max_wait: Duration,
    mut operation: F,
) -> AppResult<T>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let attempts = max_attempts.max(1);
    let mut wait = initial_wait;
    let mut last_error = String::new();
    for attempt in 1..=attempts {
        defo!("attempt {}/{}", attempt, attempts);
        match operation() {
            Ok(val) => return Ok(val),
            Err(err) => {
                last_error = err.to_string();
                if attempt < attempts {
                    log::warn!(
                        "attempt {}/{} failed: {}; retrying in {:?}",
                        attempt,
                        attempts,
                        last_error,
                        wait,
                    );
                    thread::sleep(wait);
                    wait = std::cmp::min(wait.saturating_mul(2), max_wait);
                }
            }
        }
    }
    log::error!("retry exhausted after {} attempts: {}", attempts, last_error);

    Err(AppError::RetryExhausted {
        attempts,
        last_error,
    })
}

/// [`with_retry`] with the default attempt count and waits.
pub fn with_retry_default<T, E, F>(operation: F) -> AppResult<T>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    with_retry(
        RETRY_ATTEMPTS_DEFAULT,
        RETRY_WAIT_DEFAULT,
        RETRY_WAIT_MAX_DEFAULT,
        operation,
    )
}
