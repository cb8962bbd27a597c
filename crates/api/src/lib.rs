//! Jupiter aggregator API client.
//!
//! This crate provides:
//! - `JupiterClient`: HTTP client for the quote, swap, price and route-map endpoints
//! - `SwapAggregator`: backend trait with best-swap and exchange-rate helpers
//! - Retry with constant backoff and jitter for transient failures

mod aggregator;
mod client;
mod error;
mod retry;

pub use aggregator::SwapAggregator;
pub use client::{Envelope, JupiterClient};
pub use error::{ApiError, ApiResult};
pub use retry::{execute_with_retry, RetryPolicy, Retryable};
