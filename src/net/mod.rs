// src/net/mod.rs

//! Outbound HTTP for _raptlib_: a thin blocking client wrapper and a
//! retry helper with exponential backoff.

pub mod httpclient;
pub mod retry;
