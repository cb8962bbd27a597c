//! Errors raised while validating parameters or interpreting aggregator data.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced by the data model, independent of any transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The quote list contained no route that could be used.
    #[error("no usable route in quote response")]
    NoRoute,

    /// A string-encoded integer amount could not be parsed.
    #[error("failed to parse {field} {value:?}: {source}")]
    InvalidAmount {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// A token or wallet address is not a base58-encoded 32-byte key.
    #[error("invalid address {0:?}")]
    InvalidMint(String),

    /// Request parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}

impl ModelError {
    pub(crate) fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }
}

/// Parse a string-encoded unsigned integer amount.
pub(crate) fn parse_amount(field: &'static str, value: &str) -> Result<u64, ModelError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|source| ModelError::InvalidAmount {
            field,
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("inAmount", "1000000").unwrap(), 1_000_000);
        assert_eq!(parse_amount("inAmount", " 42 ").unwrap(), 42);

        let err = parse_amount("outAmount", "-5").unwrap_err();
        assert!(matches!(err, ModelError::InvalidAmount { field: "outAmount", .. }));
        assert!(err.to_string().contains("outAmount"));
    }

    #[test]
    fn test_parse_amount_overflow() {
        // u64::MAX + 1
        assert!(parse_amount("inAmount", "18446744073709551616").is_err());
    }
}
