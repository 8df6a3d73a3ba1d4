//! Utility functions and helpers for promconf.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
