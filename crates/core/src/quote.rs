//! Quote payloads returned by the aggregator and best-route selection.
//!
//! A quote call returns one or more candidate routes for a token pair and
//! amount. Amounts travel as string-encoded integers (raw token units) and
//! are only parsed when a caller needs to compare or convert them.

use crate::error::{parse_amount, ModelError};
use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the swap the requested amount refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SwapMode {
    /// `amount` is the exact input; the output floats.
    #[default]
    ExactIn,
    /// `amount` is the exact output; the input floats.
    ExactOut,
}

impl SwapMode {
    /// Wire name (`ExactIn` / `ExactOut`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExactIn => "ExactIn",
            Self::ExactOut => "ExactOut",
        }
    }
}

impl fmt::Display for SwapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwapMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exactin" => Ok(Self::ExactIn),
            "exactout" => Ok(Self::ExactOut),
            other => Err(ModelError::invalid_params(format!("unknown swap mode {other:?}"))),
        }
    }
}

/// Fee charged by a market or the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    pub amount: String,
    pub mint: String,
    #[serde(default)]
    pub pct: f64,
}

/// A market the route passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub id: String,
    pub label: String,
    pub input_mint: String,
    pub output_mint: String,
    #[serde(default)]
    pub not_enough_liquidity: bool,
    pub in_amount: String,
    pub out_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_in_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_out_amount: Option<String>,
    #[serde(default)]
    pub price_impact_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lp_fee: Option<Fee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_fee: Option<Fee>,
}

/// AMM leg of a route plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub amm_key: String,
    #[serde(default)]
    pub label: String,
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: String,
    pub out_amount: String,
    #[serde(default)]
    pub fee_amount: String,
    #[serde(default)]
    pub fee_mint: String,
}

/// One step of a route plan; `percent` of the input flows through `swap_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    pub percent: u8,
    pub swap_info: SwapInfo,
}

/// Platform fee attached to a quote when `feeBps` was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFee {
    pub amount: String,
    pub fee_bps: u16,
}

/// A single priced route candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub input_mint: String,
    pub output_mint: String,
    /// Raw input amount
    pub in_amount: String,
    /// Raw output amount
    pub out_amount: String,
    /// Minimum output (ExactIn) or maximum input (ExactOut) after slippage
    #[serde(default)]
    pub other_amount_threshold: String,
    #[serde(default)]
    pub swap_mode: SwapMode,
    #[serde(default)]
    pub slippage_bps: u16,
    #[serde(default)]
    pub price_impact_pct: String,
    #[serde(default)]
    pub route_plan: Vec<RoutePlanStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub market_infos: Vec<MarketInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_fee: Option<PlatformFee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_type: Option<String>,
    #[serde(default)]
    pub context_slot: u64,
    #[serde(default)]
    pub time_taken: f64,
}

impl Quote {
    /// Parsed input amount.
    pub fn in_amount_u64(&self) -> Result<u64, ModelError> {
        parse_amount("inAmount", &self.in_amount)
    }

    /// Parsed output amount.
    pub fn out_amount_u64(&self) -> Result<u64, ModelError> {
        parse_amount("outAmount", &self.out_amount)
    }

    /// Price impact as a fraction, if the server sent a parseable value.
    pub fn price_impact(&self) -> Option<f64> {
        self.price_impact_pct.trim().parse().ok()
    }

    /// False if any market on the route reports insufficient liquidity.
    pub fn has_liquidity(&self) -> bool {
        !self.market_infos.iter().any(|m| m.not_enough_liquidity)
    }

    /// AMM labels along the route.
    pub fn labels(&self) -> Vec<&str> {
        if self.route_plan.is_empty() {
            self.market_infos.iter().map(|m| m.label.as_str()).collect()
        } else {
            self.route_plan
                .iter()
                .map(|step| step.swap_info.label.as_str())
                .collect()
        }
    }

    /// Check if this is a single-market route.
    pub fn is_direct(&self) -> bool {
        if self.route_plan.is_empty() {
            self.market_infos.len() == 1
        } else {
            self.route_plan.len() == 1
        }
    }

    /// The amount compared when ranking routes for `mode`.
    fn ranking_amount(&self, mode: SwapMode) -> Result<u64, ModelError> {
        match mode {
            SwapMode::ExactIn => self.out_amount_u64(),
            SwapMode::ExactOut => self.in_amount_u64(),
        }
    }
}

/// Routes returned by a quote request, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(into = "Vec<Quote>")]
pub struct QuoteList(Vec<Quote>);

// Accepts a list of routes or a single route object. Each shape is decoded
// directly so field errors (missing `outAmount`, bad types) surface as-is.
impl<'de> Deserialize<'de> for QuoteList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QuoteListVisitor;

        impl<'de> Visitor<'de> for QuoteListVisitor {
            type Value = QuoteList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a route or a list of routes")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<QuoteList, A::Error> {
                Vec::<Quote>::deserialize(SeqAccessDeserializer::new(seq)).map(QuoteList)
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<QuoteList, A::Error> {
                let route = Quote::deserialize(MapAccessDeserializer::new(map))?;
                Ok(QuoteList(vec![route]))
            }
        }

        deserializer.deserialize_any(QuoteListVisitor)
    }
}

impl QuoteList {
    /// Wrap routes in server order.
    pub fn new(routes: Vec<Quote>) -> Self {
        Self(routes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.0.iter()
    }

    pub fn routes(&self) -> &[Quote] {
        &self.0
    }

    /// Unwrap into the route vector.
    pub fn into_inner(self) -> Vec<Quote> {
        self.0
    }

    /// Pick the best route for `mode`.
    ///
    /// `ExactIn` prefers the largest output, `ExactOut` the smallest input.
    /// Routes flagged with insufficient liquidity are skipped and ties keep
    /// the earlier route. An unparseable amount fails the whole selection.
    pub fn best_route(&self, mode: SwapMode) -> Result<&Quote, ModelError> {
        let mut best: Option<(&Quote, u64)> = None;

        for route in self.0.iter().filter(|r| r.has_liquidity()) {
            let amount = route.ranking_amount(mode)?;
            let better = match best {
                None => true,
                Some((_, current)) => match mode {
                    SwapMode::ExactIn => amount > current,
                    SwapMode::ExactOut => amount < current,
                },
            };
            if better {
                best = Some((route, amount));
            }
        }

        best.map(|(route, _)| route).ok_or(ModelError::NoRoute)
    }
}

impl From<QuoteList> for Vec<Quote> {
    fn from(list: QuoteList) -> Self {
        list.0
    }
}

impl From<Vec<Quote>> for QuoteList {
    fn from(routes: Vec<Quote>) -> Self {
        Self(routes)
    }
}

impl IntoIterator for QuoteList {
    type Item = Quote;
    type IntoIter = std::vec::IntoIter<Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuoteList {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
