// src/notify/telegram.rs

//! Telegram notification sink.
//!
//! Posts messages through the Bot API `sendMessage` method. Notifications
//! are best-effort: a disabled notifier or a failed send is logged and
//! swallowed, never propagated; notifications must not interrupt the
//! application they report on.

use std::time::Duration;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

use crate::cfg::config::TelegramConfig;
use crate::net::httpclient::describe_ureq_error;

/// Bot API endpoint root. Overridable for tests.
pub const TELEGRAM_API_BASE_DEFAULT: &str = "https://api.telegram.org";

const SEND_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends notifications to one Telegram chat.
pub struct TelegramNotifier {
    enabled: bool,
    bot_token: String,
    chat_id: String,
    api_base: String,
    agent: ureq::Agent,
}

impl TelegramNotifier {
    pub fn new(config: &TelegramConfig) -> TelegramNotifier {
        TelegramNotifier::with_api_base(config, TELEGRAM_API_BASE_DEFAULT)
    }

    /// Like [`TelegramNotifier::new`] with a custom Bot API root.
    pub fn with_api_base(
        config: &TelegramConfig,
        api_base: &str,
    ) -> TelegramNotifier {
        if config.enabled && config.bot_token.is_empty() {
            log::warn!("Telegram enabled but bot_token is empty");
        } else if config.enabled {
            log::info!("Telegram notifier initialized: chat_id={}", config.chat_id);
        }
        let agent = ureq::AgentBuilder::new()
            .timeout(SEND_TIMEOUT)
            .timeout_connect(CONNECT_TIMEOUT)
            .build();

        TelegramNotifier {
            enabled: config.enabled,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
            api_base: api_base.trim_end_matches('/').to_string(),
            agent,
        }
    }

    /// Enabled with a usable token?
    pub fn is_active(&self) -> bool {
        self.enabled && !self.bot_token.is_empty()
    }

    /// Send `message` with Markdown formatting.
    pub fn send_message(
        &self,
        message: &str,
    ) {
        self.send_message_with_mode(message, "Markdown")
    }

    /// Send `message` with the given Bot API `parse_mode`.
    pub fn send_message_with_mode(
        &self,
        message: &str,
        parse_mode: &str,
    ) {
        if !self.is_active() {
            log::debug!("Telegram notification skipped (disabled)");
            return;
        }
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(serde_json::json!({
                "chat_id": self.chat_id,
                "text": message,
                "parse_mode": parse_mode,
            }));
        match result {
            Ok(_response) => {
                log::info!("Telegram message sent to {}", self.chat_id);
            }
            Err(err) => {
                log::error!(
                    "Failed to send Telegram message: {}",
                    describe_ureq_error(&err),
                );
            }
        }
    }

    /// Send an error alert with optional context.
    pub fn send_error(
        &self,
        error: &dyn std::fmt::Display,
        context: &str,
    ) {
        let mut message = String::from("🚨 **Error Alert**\n\n");
        if !context.is_empty() {
            message.push_str(&format!("**Context:** {}\n\n", context));
        }
        message.push_str(&format!("**Error:** {}", error));
        self.send_message(&message);
    }
}
