//! Indexed route map: which output mints are reachable from each input mint.
//!
//! The server indexes mints to keep the payload small. `mint_keys` holds every
//! mint once and `indexed_route_map` maps a stringified index into
//! `mint_keys` to the indexes of its reachable output mints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Route map as returned by the `indexed-route-map` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedRoutesMap {
    /// All the mints referenced by `indexed_route_map`.
    #[serde(default)]
    pub mint_keys: Vec<String>,
    /// Input mint index -> output mint indexes.
    #[serde(default)]
    pub indexed_route_map: HashMap<String, Vec<usize>>,
}

impl IndexedRoutesMap {
    /// Output mints reachable from `mint`. Unknown mints yield nothing and
    /// indexes past the end of `mint_keys` are skipped.
    pub fn routes_for_mint(&self, mint: &str) -> Vec<&str> {
        let Some(index) = self.mint_keys.iter().position(|key| key == mint) else {
            return Vec::new();
        };

        self.indexed_route_map
            .get(&index.to_string())
            .map(|outputs| self.resolve(outputs))
            .unwrap_or_default()
    }

    /// Whether a swap from `input` to `output` has a known route.
    pub fn has_route(&self, input: &str, output: &str) -> bool {
        self.routes_for_mint(input).contains(&output)
    }

    /// Fully de-indexed map keyed by input mint.
    pub fn to_routes_map(&self) -> HashMap<String, Vec<String>> {
        self.indexed_route_map
            .iter()
            .filter_map(|(key, outputs)| {
                let input = self.mint_keys.get(key.parse::<usize>().ok()?)?;
                let outputs = self.resolve(outputs).into_iter().map(str::to_string).collect();
                Some((input.clone(), outputs))
            })
            .collect()
    }

    /// Number of input mints with routes.
    pub fn len(&self) -> usize {
        self.indexed_route_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexed_route_map.is_empty()
    }

    fn resolve(&self, indexes: &[usize]) -> Vec<&str> {
        indexes
            .iter()
            .filter_map(|&i| self.mint_keys.get(i).map(String::as_str))
            .collect()
    }
}
