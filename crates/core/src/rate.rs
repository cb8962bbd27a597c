//! Exchange rate derived from a quote route.

use crate::error::ModelError;
use crate::quote::Quote;
use serde::{Deserialize, Serialize};

/// Amounts exchanged on the best route for a token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub input_mint: String,
    pub output_mint: String,
    /// Raw amount of input token
    pub in_amount: u64,
    /// Raw amount of output token
    pub out_amount: u64,
}

impl Rate {
    /// Build a rate from the route's own mints and amounts.
    pub fn from_quote(quote: &Quote) -> Result<Self, ModelError> {
        Ok(Self {
            input_mint: quote.input_mint.clone(),
            output_mint: quote.output_mint.clone(),
            in_amount: quote.in_amount_u64()?,
            out_amount: quote.out_amount_u64()?,
        })
    }

    /// Output units received per input unit (raw, not decimal-adjusted).
    pub fn price(&self) -> Option<f64> {
        (self.in_amount != 0).then(|| self.out_amount as f64 / self.in_amount as f64)
    }

    /// Input units paid per output unit.
    pub fn inverse_price(&self) -> Option<f64> {
        (self.out_amount != 0).then(|| self.in_amount as f64 / self.out_amount as f64)
    }

    /// Price adjusted for token decimals.
    pub fn ui_price(&self, input_decimals: u8, output_decimals: u8) -> Option<f64> {
        let scale = 10_f64.powi(input_decimals as i32 - output_decimals as i32);
        self.price().map(|p| p * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::tests::quote;

    #[test]
    fn test_from_quote() {
        let rate = Rate::from_quote(&quote("1000000000", "171234567")).unwrap();
        assert_eq!(rate.in_amount, 1_000_000_000);
        assert_eq!(rate.out_amount, 171_234_567);
        assert_eq!(rate.input_mint, quote("1", "1").input_mint);
    }

    #[test]
    fn test_from_quote_bad_amount() {
        let err = Rate::from_quote(&quote("abc", "1")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidAmount { field: "inAmount", .. }));
    }

    #[test]
    fn test_price() {
        let rate = Rate {
            input_mint: String::new(),
            output_mint: String::new(),
            in_amount: 4,
            out_amount: 10,
        };
        assert_eq!(rate.price(), Some(2.5));
        assert_eq!(rate.inverse_price(), Some(0.4));

        // 1 SOL (9 decimals) -> 171.5 USDC (6 decimals)
        let rate = Rate {
            in_amount: 1_000_000_000,
            out_amount: 171_500_000,
            ..rate
        };
        let ui = rate.ui_price(9, 6).unwrap();
        assert!((ui - 171.5).abs() < 1e-9);
    }

    #[test]
    fn test_price_zero_amounts() {
        let rate = Rate {
            input_mint: String::new(),
            output_mint: String::new(),
            in_amount: 0,
            out_amount: 0,
        };
        assert_eq!(rate.price(), None);
        assert_eq!(rate.inverse_price(), None);
    }

    #[test]
    fn test_serialize() {
        let rate = Rate::from_quote(&quote("5", "7")).unwrap();
        let value = serde_json::to_value(&rate).unwrap();
        assert_eq!(value["inAmount"], 5);
        assert_eq!(value["outAmount"], 7);
        assert!(value.get("inputMint").is_some());
    }
}
