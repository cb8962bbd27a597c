//! Token mint addresses.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decoded length of a Solana public key.
const ADDRESS_LEN: usize = 32;

/// Well-known mint addresses.
pub mod mints {
    /// Wrapped SOL.
    pub const SOL: &str = "So11111111111111111111111111111111111111112";
    /// USD Coin.
    pub const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
    /// Tether USD.
    pub const USDT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
}

/// Check that `address` is base58 and decodes to a 32-byte key.
pub fn is_valid_address(address: &str) -> bool {
    matches!(bs58::decode(address).into_vec(), Ok(bytes) if bytes.len() == ADDRESS_LEN)
}

/// A validated on-chain token address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Mint(String);

impl Mint {
    /// Validate and wrap a base58 address.
    pub fn new(address: impl Into<String>) -> Result<Self, ModelError> {
        let address = address.into();
        if is_valid_address(&address) {
            Ok(Self(address))
        } else {
            Err(ModelError::InvalidMint(address))
        }
    }

    /// Wrapped SOL.
    pub fn sol() -> Self {
        Self(mints::SOL.to_string())
    }

    /// USDC.
    pub fn usdc() -> Self {
        Self(mints::USDC.to_string())
    }

    /// Base58 address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the address string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Mint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Mint {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

impl TryFrom<String> for Mint {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mint> for String {
    fn from(mint: Mint) -> Self {
        mint.0
    }
}

impl AsRef<str> for Mint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mints_are_valid() {
        for mint in [mints::SOL, mints::USDC, mints::USDT] {
            assert!(is_valid_address(mint), "{mint} should be valid");
        }
        assert_eq!(Mint::sol().as_str(), mints::SOL);
        assert_eq!(Mint::usdc().to_string(), mints::USDC);
    }

    #[test]
    fn test_rejects_bad_addresses() {
        // Not base58 ('0' and 'l' are excluded from the alphabet)
        assert!(Mint::new("0lSOL").is_err());
        // Valid base58 but too short
        assert!(Mint::new("SOL").is_err());
        assert!(Mint::new("").is_err());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let mint: Mint = format!("  {}\n", mints::USDC).parse().unwrap();
        assert_eq!(mint, Mint::usdc());
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Mint::sol()).unwrap();
        assert_eq!(json, format!("\"{}\"", mints::SOL));

        let parsed: Mint = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Mint::sol());

        assert!(serde_json::from_str::<Mint>("\"nope\"").is_err());
    }
}
