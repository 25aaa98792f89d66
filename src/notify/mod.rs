// src/notify/mod.rs

//! Notification sinks for _raptlib_. Telegram only, for now.

pub mod telegram;
