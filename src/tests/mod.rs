// src/tests/mod.rs

//! Tests for _raptlib_.
//!
//! Tests are placed at `src/tests/`, inside the `raptlib`. Tests placed at
//! top-level path `tests/` do not have crate-internal visibility; retention
//! and rotation tests want to drive internal passes directly.

pub mod common;
pub mod config_tests;
pub mod httpclient_tests;
pub mod retry_tests;
pub mod shutdown_tests;
pub mod telegram_tests;
