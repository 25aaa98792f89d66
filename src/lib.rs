// src/lib.rs

pub mod cfg;
pub mod common;
pub mod debug;
pub mod logging;
pub mod net;
pub mod notify;
pub mod runner;
#[cfg(test)]
pub mod tests;

pub fn main() {}
