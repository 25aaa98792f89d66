// src/tests/retry_tests.rs

//! tests for `retry.rs` functions

use std::time::Duration;

use crate::common::AppError;
use crate::net::retry::with_retry;

const NO_WAIT: Duration = Duration::from_millis(0);
const TINY_WAIT: Duration = Duration::from_millis(1);

#[test]
fn test_first_attempt_success() {
    let mut calls: u32 = 0;
    let result: Result<u32, AppError> = with_retry(3, NO_WAIT, NO_WAIT, || {
        calls += 1;
        Ok::<u32, String>(7)
    });

    assert_eq!(result.unwrap(), 7);
    assert_eq!(calls, 1);
}

#[test]
fn test_succeeds_after_failures() {
    let mut calls: u32 = 0;
    let result = with_retry(5, TINY_WAIT, TINY_WAIT, || {
        calls += 1;
        if calls < 3 {
            Err(String::from("not yet"))
        } else {
            Ok(calls)
        }
    });

    assert_eq!(result.unwrap(), 3);
    assert_eq!(calls, 3);
}

#[test]
fn test_exhaustion_returns_last_error() {
    let mut calls: u32 = 0;
    let result: Result<(), AppError> = with_retry(3, NO_WAIT, NO_WAIT, || {
        calls += 1;
        Err::<(), String>(format!("failure {}", calls))
    });

    assert_eq!(calls, 3);
    match result {
        Err(AppError::RetryExhausted {
            attempts,
            last_error,
        }) => {
            assert_eq!(attempts, 3);
            assert_eq!(last_error, "failure 3");
        }
        other => panic!("expected RetryExhausted, got {:?}", other),
    }
}

#[test]
fn test_zero_attempts_means_one() {
    let mut calls: u32 = 0;
    let result: Result<(), AppError> = with_retry(0, NO_WAIT, NO_WAIT, || {
        calls += 1;
        Err::<(), &str>("nope")
    });

    assert_eq!(calls, 1);
    assert!(matches!(
        result,
        Err(AppError::RetryExhausted { attempts: 1, .. })
    ));
}
