//! Data model for the Jupiter swap aggregator API.
//!
//! This crate provides:
//! - Wire types for quotes, prices and the indexed route map
//! - Request parameter structs with validation
//! - Best-route selection and exchange rate calculation
//! - Client configuration (TOML file + environment overrides)

pub mod config;
mod error;
mod mint;
mod params;
mod price;
mod quote;
mod rate;
mod routes_map;

pub use config::{ClientConfig, RetryConfig};
pub use error::ModelError;
pub use mint::{is_valid_address, mints, Mint};
pub use params::{
    BestSwapParams, ExchangeRateParams, PriceParams, QuoteParams, RoutesMapParams, SwapParams,
};
pub use price::{Price, PriceMap};
pub use quote::{Fee, MarketInfo, PlatformFee, Quote, QuoteList, RoutePlanStep, SwapInfo, SwapMode};
pub use rate::Rate;
pub use routes_map::IndexedRoutesMap;
