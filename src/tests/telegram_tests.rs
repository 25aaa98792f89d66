// src/tests/telegram_tests.rs

//! tests for `telegram.rs` functions
//!
//! No test here performs network I/O; a disabled or tokenless notifier
//! short-circuits before building a request.

use crate::cfg::config::TelegramConfig;
use crate::notify::telegram::TelegramNotifier;

fn config(
    enabled: bool,
    bot_token: &str,
) -> TelegramConfig {
    TelegramConfig {
        enabled,
        bot_token: String::from(bot_token),
        chat_id: String::from("12345"),
    }
}

#[test]
fn test_disabled_notifier_is_inactive() {
    let notifier = TelegramNotifier::new(&config(false, "sometoken"));
    assert!(!notifier.is_active());
}

#[test]
fn test_enabled_without_token_is_inactive() {
    let notifier = TelegramNotifier::new(&config(true, ""));
    assert!(!notifier.is_active());
}

#[test]
fn test_enabled_with_token_is_active() {
    let notifier = TelegramNotifier::new(&config(true, "sometoken"));
    assert!(notifier.is_active());
}

#[test]
fn test_inactive_send_is_noop() {
    let notifier = TelegramNotifier::new(&config(false, ""));
    // must not panic, must not attempt any request
    notifier.send_message("hello");
    notifier.send_error(&"boom", "context");
}
