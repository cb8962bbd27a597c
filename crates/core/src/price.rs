//! Simple price lookups.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Price of one token in units of another (USDC unless `vsToken` was given).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Address of the token
    pub id: String,
    #[serde(default)]
    pub mint_symbol: String,
    /// Address of the token priced against
    #[serde(default)]
    pub vs_token: String,
    #[serde(default)]
    pub vs_token_symbol: String,
    pub price: f64,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {:.6} {}",
            self.id, self.mint_symbol, self.price, self.vs_token_symbol
        )
    }
}

/// Prices keyed by the id or symbol used in the request.
pub type PriceMap = HashMap<String, Price>;
