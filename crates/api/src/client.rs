//! Jupiter aggregator HTTP client.

use crate::aggregator::SwapAggregator;
use crate::error::{ApiError, ApiResult};
use crate::retry::{execute_with_retry, RetryPolicy};
use async_trait::async_trait;
use jupag_core::{
    ClientConfig, IndexedRoutesMap, PriceMap, PriceParams, QuoteList, QuoteParams,
    RoutesMapParams, SwapParams,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// `{ "data": ..., "timeTaken": ..., "contextSlot": ... }` wrapper used by
/// the quote and price endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub time_taken: f64,
    #[serde(default)]
    pub context_slot: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwapResponse {
    /// Base64-encoded unsigned transaction
    #[serde(default)]
    swap_transaction: String,
}

fn decode<T: DeserializeOwned>(context: &'static str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode { context, source })
}

/// Client for the Jupiter quote, swap, price and route-map endpoints.
#[derive(Debug, Clone)]
pub struct JupiterClient {
    http: reqwest::Client,
    config: ClientConfig,
    retry: RetryPolicy,
}

impl JupiterClient {
    /// Create a client with the default endpoint, timeout and retry policy.
    pub fn new() -> ApiResult<Self> {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> ApiResult<Self> {
        config
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        let retry = RetryPolicy::from(&config.retry);

        Ok(Self { http, config, retry })
    }

    /// Create a client against a different base URL (self-hosted API, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::from_config(ClientConfig {
            api_url: base_url.into(),
            ..ClientConfig::default()
        })
    }

    /// Replace the retry policy taken from the config.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    async fn get<Q>(&self, url: &str, query: &Q) -> ApiResult<String>
    where
        Q: Serialize + ?Sized + Sync,
    {
        self.execute(|| self.http.get(url).query(query)).await
    }

    async fn post<B>(&self, url: &str, body: &B) -> ApiResult<String>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.execute(|| self.http.post(url).json(body)).await
    }

    /// Send the request built by `build`, retrying transient failures.
    /// Non-success statuses become [`ApiError::Status`].
    async fn execute<F>(&self, build: F) -> ApiResult<String>
    where
        F: Fn() -> reqwest::RequestBuilder + Sync,
    {
        let build = &build;
        execute_with_retry(&self.retry, move || async move {
            let response = build().send().await?;
            let status = response.status();
            let url = response.url().clone();
            let body = response.text().await?;

            debug!(%url, status = status.as_u16(), bytes = body.len(), "Aggregator response");

            if !status.is_success() {
                return Err(ApiError::Status { status, body });
            }
            Ok(body)
        })
        .await
    }

    #[instrument(
        skip(self, params),
        fields(
            input_mint = %params.input_mint,
            output_mint = %params.output_mint,
            amount = params.amount
        )
    )]
    async fn fetch_quote(&self, params: &QuoteParams) -> ApiResult<QuoteList> {
        params.validate()?;

        let body = self.get(&self.config.quote_url(), params).await?;
        let envelope: Envelope<QuoteList> = decode("quote", &body)?;

        if envelope.data.is_empty() {
            return Err(ApiError::NoQuotes);
        }

        debug!(
            routes = envelope.data.len(),
            time_taken = envelope.time_taken,
            context_slot = envelope.context_slot,
            "Got quote routes"
        );

        Ok(envelope.data)
    }

    #[instrument(skip(self, params), fields(user = %params.user_public_key))]
    async fn fetch_swap_transaction(&self, params: &SwapParams) -> ApiResult<String> {
        params.validate()?;

        let body = self.post(&self.config.swap_url(), params).await?;
        let response: SwapResponse = decode("swap", &body)?;

        if response.swap_transaction.is_empty() {
            return Err(ApiError::EmptyTransaction);
        }

        debug!(tx_len = response.swap_transaction.len(), "Got swap transaction");
        Ok(response.swap_transaction)
    }

    #[instrument(skip(self, params), fields(ids = %params.ids.join(",")))]
    async fn fetch_prices(&self, params: &PriceParams) -> ApiResult<PriceMap> {
        params.validate()?;

        let body = self.get(&self.config.price_url(), params).await?;
        let envelope: Envelope<PriceMap> = decode("price", &body)?;

        debug!(prices = envelope.data.len(), "Got prices");
        Ok(envelope.data)
    }

    #[instrument(skip(self))]
    async fn fetch_routes_map(&self, only_direct_routes: bool) -> ApiResult<IndexedRoutesMap> {
        let params = RoutesMapParams { only_direct_routes };

        let body = self.get(&self.config.routes_map_url(), &params).await?;
        let routes_map: IndexedRoutesMap = decode("routes map", &body)?;

        debug!(
            mints = routes_map.mint_keys.len(),
            inputs = routes_map.len(),
            "Got indexed route map"
        );
        Ok(routes_map)
    }
}

#[async_trait]
impl SwapAggregator for JupiterClient {
    fn aggregator_id(&self) -> &str {
        "jupiter"
    }

    async fn quote(&self, params: &QuoteParams) -> ApiResult<QuoteList> {
        self.fetch_quote(params).await
    }

    async fn swap(&self, params: &SwapParams) -> ApiResult<String> {
        self.fetch_swap_transaction(params).await
    }

    async fn price(&self, params: &PriceParams) -> ApiResult<PriceMap> {
        self.fetch_prices(params).await
    }

    async fn routes_map(&self, only_direct_routes: bool) -> ApiResult<IndexedRoutesMap> {
        self.fetch_routes_map(only_direct_routes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jupag_core::{Price, Quote};

    #[test]
    fn test_client_creation() {
        let client = JupiterClient::new().unwrap();
        assert_eq!(client.aggregator_id(), "jupiter");
        assert_eq!(client.config().api_url, "https://price.jup.ag/v6");
        assert_eq!(client.retry_policy(), &RetryPolicy::default());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = JupiterClient::with_base_url("price.jup.ag").unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_decode_quote_envelope() {
        let json = r#"{
            "data": [{
                "inputMint": "So11111111111111111111111111111111111111112",
                "outputMint": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "inAmount": "1000",
                "outAmount": "171"
            }],
            "timeTaken": 0.004,
            "contextSlot": 99
        }"#;

        let envelope: Envelope<QuoteList> = decode("quote", json).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.context_slot, 99);
        let route: &Quote = &envelope.data.routes()[0];
        assert_eq!(route.out_amount, "171");
    }

    #[test]
    fn test_decode_price_envelope_without_metadata() {
        let json = r#"{"data": {"SOL": {"id": "So11111111111111111111111111111111111111112", "price": 171.0}}}"#;
        let envelope: Envelope<PriceMap> = decode("price", json).unwrap();
        let sol: &Price = &envelope.data["SOL"];
        assert_eq!(sol.price, 171.0);
        assert_eq!(envelope.time_taken, 0.0);
    }

    #[test]
    fn test_decode_error_carries_context() {
        let err = decode::<Envelope<PriceMap>>("price", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode { context: "price", .. }));
        assert!(err.to_string().starts_with("failed to decode price response"));
    }

    #[test]
    fn test_decode_swap_response() {
        let response: SwapResponse = decode("swap", r#"{"swapTransaction": "AQAB"}"#).unwrap();
        assert_eq!(response.swap_transaction, "AQAB");

        let empty: SwapResponse = decode("swap", "{}").unwrap();
        assert!(empty.swap_transaction.is_empty());
    }
}
