//! Swap aggregator abstraction.
//!
//! Implementors provide the four raw endpoints; the composite operations
//! (`best_swap`, `exchange_rate`, `price_of`) are built on top of them.
//!
//! # Example
//!
//! ```rust,ignore
//! use jupag_api::{JupiterClient, SwapAggregator};
//! use jupag_core::{mints, ExchangeRateParams};
//!
//! let client = JupiterClient::new()?;
//! let rate = client
//!     .exchange_rate(ExchangeRateParams::new(mints::SOL, mints::USDC, 1_000_000_000))
//!     .await?;
//! println!("1 SOL = {:?} USDC", rate.ui_price(9, 6));
//! ```

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use jupag_core::{
    BestSwapParams, ExchangeRateParams, IndexedRoutesMap, Price, PriceMap, PriceParams,
    QuoteList, QuoteParams, Rate, SwapParams,
};
use std::fmt::Debug;
use tracing::debug;

/// Trait for swap aggregation backends.
#[async_trait]
pub trait SwapAggregator: Send + Sync + Debug {
    /// Backend identifier (e.g. "jupiter").
    fn aggregator_id(&self) -> &str;

    /// Candidate routes for a token pair and amount. Never empty on success.
    async fn quote(&self, params: &QuoteParams) -> ApiResult<QuoteList>;

    /// Base64-encoded unsigned transaction for a route. The caller signs it.
    async fn swap(&self, params: &SwapParams) -> ApiResult<String>;

    /// Prices for one or more tokens.
    async fn price(&self, params: &PriceParams) -> ApiResult<PriceMap>;

    /// Indexed map of input mint -> reachable output mints.
    async fn routes_map(&self, only_direct_routes: bool) -> ApiResult<IndexedRoutesMap>;

    /// Quote, pick the best route and build its swap transaction.
    ///
    /// Swap mode defaults to `ExactIn`. SOL is wrapped/unwrapped and a
    /// legacy transaction is requested.
    async fn best_swap(&self, params: BestSwapParams) -> ApiResult<String> {
        params.validate()?;

        let mode = params.effective_swap_mode();
        let routes = self.quote(&params.quote_params()).await?;
        let route = routes.best_route(mode)?.clone();

        debug!(
            aggregator = self.aggregator_id(),
            swap_mode = %mode,
            candidates = routes.len(),
            in_amount = %route.in_amount,
            out_amount = %route.out_amount,
            "Selected best route"
        );

        self.swap(&params.swap_params(route)).await
    }

    /// Amounts exchanged on the best route for a token pair.
    async fn exchange_rate(&self, params: ExchangeRateParams) -> ApiResult<Rate> {
        let routes = self.quote(&params.quote_params()).await?;
        let route = routes.best_route(params.effective_swap_mode())?;

        Ok(Rate {
            input_mint: params.input_mint,
            output_mint: params.output_mint,
            in_amount: route.in_amount_u64()?,
            out_amount: route.out_amount_u64()?,
        })
    }

    /// Price of a single token.
    async fn price_of(&self, id: &str) -> ApiResult<Price> {
        let mut prices = self.price(&PriceParams::new([id])).await?;
        prices
            .remove(id)
            .ok_or_else(|| ApiError::MissingPrice(id.to_string()))
    }
}
