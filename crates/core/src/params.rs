//! Request parameters.
//!
//! Query parameters serialize straight into the request URL, so empty values
//! are skipped rather than sent as `false` or blank strings.

use crate::error::ModelError;
use crate::mint::is_valid_address;
use crate::quote::{Quote, SwapMode};
use serde::{Serialize, Serializer};

fn is_false(value: &bool) -> bool {
    !*value
}

fn join_ids<S: Serializer>(ids: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ids.join(","))
}

fn check_address(field: &str, value: &str) -> Result<(), ModelError> {
    if value.is_empty() {
        return Err(ModelError::invalid_params(format!("{field} is required")));
    }
    if !is_valid_address(value) {
        return Err(ModelError::invalid_params(format!(
            "{field} {value:?} is not a valid address"
        )));
    }
    Ok(())
}

/// Parameters for a quote request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    pub input_mint: String,
    pub output_mint: String,
    /// Raw amount; input for `ExactIn`, output for `ExactOut`
    pub amount: u64,
    /// Server default is `ExactIn`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap_mode: Option<SwapMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slippage_bps: Option<u16>,
    /// Platform fee in basis points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_bps: Option<u16>,
    #[serde(skip_serializing_if = "is_false")]
    pub dynamic_slippage: bool,
    /// Only direct routes (no hops, no split trades)
    #[serde(skip_serializing_if = "is_false")]
    pub only_direct_routes: bool,
    /// Only routes that fit in a single legacy transaction
    #[serde(skip_serializing_if = "is_false")]
    pub as_legacy_transaction: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub minimize_slippage: bool,
}

impl QuoteParams {
    /// Create a quote request with the required fields.
    pub fn new(input_mint: impl Into<String>, output_mint: impl Into<String>, amount: u64) -> Self {
        Self {
            input_mint: input_mint.into(),
            output_mint: output_mint.into(),
            amount,
            swap_mode: None,
            slippage_bps: None,
            fee_bps: None,
            dynamic_slippage: false,
            only_direct_routes: false,
            as_legacy_transaction: false,
            minimize_slippage: false,
        }
    }

    /// Set the swap mode.
    pub fn with_swap_mode(mut self, swap_mode: SwapMode) -> Self {
        self.swap_mode = Some(swap_mode);
        self
    }

    /// Set slippage tolerance in basis points.
    pub fn with_slippage_bps(mut self, slippage_bps: u16) -> Self {
        self.slippage_bps = Some(slippage_bps);
        self
    }

    /// Set the platform fee in basis points.
    pub fn with_fee_bps(mut self, fee_bps: u16) -> Self {
        self.fee_bps = Some(fee_bps);
        self
    }

    /// Let the server pick slippage.
    pub fn with_dynamic_slippage(mut self, enabled: bool) -> Self {
        self.dynamic_slippage = enabled;
        self
    }

    /// Restrict to single-hop routes.
    pub fn with_only_direct_routes(mut self, only_direct: bool) -> Self {
        self.only_direct_routes = only_direct;
        self
    }

    /// Only return routes that fit a legacy transaction.
    pub fn with_legacy_transaction(mut self, legacy: bool) -> Self {
        self.as_legacy_transaction = legacy;
        self
    }

    /// Prefer routes with the least slippage.
    pub fn with_minimize_slippage(mut self, enabled: bool) -> Self {
        self.minimize_slippage = enabled;
        self
    }

    /// Mode the server will apply to this request.
    pub fn effective_swap_mode(&self) -> SwapMode {
        self.swap_mode.unwrap_or_default()
    }

    /// Check mints and amount before sending.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_address("inputMint", &self.input_mint)?;
        check_address("outputMint", &self.output_mint)?;
        if self.input_mint == self.output_mint {
            return Err(ModelError::invalid_params("inputMint and outputMint must differ"));
        }
        if self.amount == 0 {
            return Err(ModelError::invalid_params("amount must be greater than zero"));
        }
        Ok(())
    }
}

/// Body of a swap request. The returned transaction is unsigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    /// Route picked from a quote response
    pub route: Quote,
    pub user_public_key: String,
    /// Wrap SOL before and unwrap after the swap
    #[serde(rename = "wrapUnwrapSOL", skip_serializing_if = "Option::is_none")]
    pub wrap_unwrap_sol: Option<bool>,
    /// Token account receiving the platform fee; only valid with `feeBps`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_account: Option<String>,
    /// Must match the quote's `asLegacyTransaction`, or the transaction may be too large
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_legacy_transaction: Option<bool>,
    /// Priority fee: compute units consumed * this price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_unit_price_micro_lamports: Option<u64>,
    /// Wallet receiving the output; its token account must already exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_wallet: Option<String>,
}

impl SwapParams {
    /// Create a swap request for `route` signed by `user_public_key`.
    pub fn new(route: Quote, user_public_key: impl Into<String>) -> Self {
        Self {
            route,
            user_public_key: user_public_key.into(),
            wrap_unwrap_sol: None,
            fee_account: None,
            as_legacy_transaction: None,
            compute_unit_price_micro_lamports: None,
            destination_wallet: None,
        }
    }

    /// Wrap and unwrap SOL around the swap.
    pub fn with_wrap_unwrap_sol(mut self, wrap: bool) -> Self {
        self.wrap_unwrap_sol = Some(wrap);
        self
    }

    /// Set the token account that receives the platform fee.
    pub fn with_fee_account(mut self, fee_account: impl Into<String>) -> Self {
        self.fee_account = Some(fee_account.into());
        self
    }

    /// Request a legacy transaction.
    pub fn with_legacy_transaction(mut self, legacy: bool) -> Self {
        self.as_legacy_transaction = Some(legacy);
        self
    }

    /// Set the priority fee per compute unit.
    pub fn with_compute_unit_price(mut self, micro_lamports: u64) -> Self {
        self.compute_unit_price_micro_lamports = Some(micro_lamports);
        self
    }

    /// Send the output to another wallet.
    pub fn with_destination_wallet(mut self, wallet: impl Into<String>) -> Self {
        self.destination_wallet = Some(wallet.into());
        self
    }

    /// Check the user, fee and destination addresses.
    pub fn validate(&self) -> Result<(), ModelError> {
        check_address("userPublicKey", &self.user_public_key)?;
        if let Some(account) = &self.fee_account {
            check_address("feeAccount", account)?;
        }
        if let Some(wallet) = &self.destination_wallet {
            check_address("destinationWallet", wallet)?;
        }
        Ok(())
    }
}

/// Parameters for a price request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceParams {
    /// Symbols or addresses, sent comma-separated (e.g. `SOL,JitoSOL`)
    #[serde(serialize_with = "join_ids")]
    pub ids: Vec<String>,
    /// Quote currency, USDC when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_token: Option<String>,
    /// Unit amount of the priced token, 1 when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vs_amount: Option<f64>,
}

impl PriceParams {
    /// Price request for the given symbols or addresses.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            vs_token: None,
            vs_amount: None,
        }
    }

    /// Parse a comma-separated id list.
    pub fn parse(ids: &str) -> Self {
        Self::new(ids.split(',').map(str::trim).filter(|id| !id.is_empty()))
    }

    /// Quote prices against another token.
    pub fn with_vs_token(mut self, vs_token: impl Into<String>) -> Self {
        self.vs_token = Some(vs_token.into());
        self
    }

    /// Price this many units of each token.
    pub fn with_vs_amount(mut self, vs_amount: f64) -> Self {
        self.vs_amount = Some(vs_amount);
        self
    }

    /// Check ids and `vsAmount`.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.ids.is_empty() {
            return Err(ModelError::invalid_params("at least one id is required"));
        }
        if self.ids.iter().any(|id| id.trim().is_empty() || id.contains(',')) {
            return Err(ModelError::invalid_params("ids must be non-empty and comma-free"));
        }
        if matches!(self.vs_amount, Some(amount) if amount.is_nan() || amount <= 0.0) {
            return Err(ModelError::invalid_params("vsAmount must be positive"));
        }
        Ok(())
    }
}

/// Parameters for the indexed route map request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesMapParams {
    pub only_direct_routes: bool,
}

/// Parameters for quoting and building the best swap in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSwapParams {
    /// Signer of the swap (base58)
    pub user_public_key: String,
    /// Receiver of the output, defaults to the user
    pub destination_public_key: Option<String>,
    /// Platform fee in basis points
    pub fee_bps: Option<u16>,
    /// Token account for the platform fee; requires `fee_bps`
    pub fee_account: Option<String>,
    pub input_mint: String,
    pub output_mint: String,
    pub amount: u64,
    /// Defaults to `ExactIn`
    pub swap_mode: Option<SwapMode>,
}

impl BestSwapParams {
    /// Create best-swap parameters; swap mode defaults to `ExactIn`.
    pub fn new(
        user_public_key: impl Into<String>,
        input_mint: impl Into<String>,
        output_mint: impl Into<String>,
        amount: u64,
    ) -> Self {
        Self {
            user_public_key: user_public_key.into(),
            destination_public_key: None,
            fee_bps: None,
            fee_account: None,
            input_mint: input_mint.into(),
            output_mint: output_mint.into(),
            amount,
            swap_mode: None,
        }
    }

    /// Send the output to another wallet.
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination_public_key = Some(destination.into());
        self
    }

    /// Charge a platform fee into `fee_account`.
    pub fn with_fee(mut self, fee_bps: u16, fee_account: impl Into<String>) -> Self {
        self.fee_bps = Some(fee_bps);
        self.fee_account = Some(fee_account.into());
        self
    }

    /// Set the swap mode.
    pub fn with_swap_mode(mut self, swap_mode: SwapMode) -> Self {
        self.swap_mode = Some(swap_mode);
        self
    }

    pub fn effective_swap_mode(&self) -> SwapMode {
        self.swap_mode.unwrap_or_default()
    }

    /// Fee account needs a fee; mints, amount and keys must be valid.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.fee_account.is_some() && self.fee_bps.is_none() {
            return Err(ModelError::invalid_params("feeAccount requires feeBps"));
        }
        self.quote_params().validate()?;
        check_address("userPublicKey", &self.user_public_key)?;
        if let Some(destination) = &self.destination_public_key {
            check_address("destinationPublicKey", destination)?;
        }
        Ok(())
    }

    /// Quote request for this swap, considering all routes.
    pub fn quote_params(&self) -> QuoteParams {
        let mut params = QuoteParams::new(&self.input_mint, &self.output_mint, self.amount)
            .with_swap_mode(self.effective_swap_mode())
            .with_only_direct_routes(false);
        params.fee_bps = self.fee_bps;
        params
    }

    /// Swap request for the chosen route.
    pub fn swap_params(&self, route: Quote) -> SwapParams {
        SwapParams {
            route,
            user_public_key: self.user_public_key.clone(),
            wrap_unwrap_sol: Some(true),
            fee_account: self.fee_account.clone(),
            as_legacy_transaction: Some(true),
            compute_unit_price_micro_lamports: None,
            destination_wallet: self.destination_public_key.clone(),
        }
    }
}

/// Parameters for an exchange rate lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateParams {
    pub input_mint: String,
    pub output_mint: String,
    /// Raw amount, interpreted according to `swap_mode`
    pub amount: u64,
    /// Left to the server when `None`
    pub swap_mode: Option<SwapMode>,
}

impl ExchangeRateParams {
    /// Create exchange-rate parameters; swap mode is left to the server.
    pub fn new(input_mint: impl Into<String>, output_mint: impl Into<String>, amount: u64) -> Self {
        Self {
            input_mint: input_mint.into(),
            output_mint: output_mint.into(),
            amount,
            swap_mode: None,
        }
    }

    /// Set the swap mode.
    pub fn with_swap_mode(mut self, swap_mode: SwapMode) -> Self {
        self.swap_mode = Some(swap_mode);
        self
    }

    pub fn effective_swap_mode(&self) -> SwapMode {
        self.swap_mode.unwrap_or_default()
    }

    pub fn quote_params(&self) -> QuoteParams {
        QuoteParams {
            swap_mode: self.swap_mode,
            ..QuoteParams::new(&self.input_mint, &self.output_mint, self.amount)
        }
    }
}
