//! Client configuration.
//!
//! Defaults match the public aggregator endpoint; a TOML file and a few
//! environment variables can override them.

mod client;

pub use client::{env, ClientConfig, RetryConfig};
