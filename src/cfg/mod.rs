// src/cfg/mod.rs

//! Configuration for _raptlib_.
//!
//! Settings load from layered YAML files: `default.yaml` first, then an
//! environment overlay (`dev.yaml`, `prod.yaml`, …) shallow-merged over it,
//! then environment-variable overrides for secrets. String policy fields
//! (rotation, retention) are parsed once at load into typed values.

pub mod config;
