// promconf - Configuration precedence and validation for a Prometheus metrics endpoint
// Author: kelexine (https://github.com/kelexine)

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod persistence;
pub mod resolve;
pub mod server;
pub mod settings;
pub mod store;
pub mod utils;
