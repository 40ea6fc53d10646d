use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::address::Address;
use crate::model::{Asset, Balance};
use crate::units::{base_units_to_f64, parse_base_units_lossy};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse pool snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything the data provider hands over for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub contract_address: Address,
    /// Outstanding pool token supply.
    pub pool_tokens: f64,
    #[serde(default)]
    pub account: Option<Address>,
    #[serde(default)]
    pub assets: Vec<Asset>,
    #[serde(default)]
    pub balances: Vec<Balance>,
}

impl PoolSnapshot {
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn asset(&self, address: &Address) -> Option<&Asset> {
        self.assets.iter().find(|a| a.token_address == *address)
    }

    pub fn balance_book(&self) -> BalanceBook {
        BalanceBook::ingest(&self.balances)
    }
}

/// Balances keyed by canonical address, already parsed into base units.
#[derive(Debug, Clone, Default)]
pub struct BalanceBook {
    entries: HashMap<Address, f64>,
}

impl BalanceBook {
    /// Parses with [`parse_base_units_lossy`]: values past `u128` are
    /// approximated and fractional base units truncated. Strings that are
    /// not numbers at all are logged and left out, which makes them read as
    /// zero like any other missing balance.
    pub fn ingest(balances: &[Balance]) -> Self {
        let mut entries = HashMap::with_capacity(balances.len());
        for b in balances {
            match parse_base_units_lossy(&b.balance) {
                Ok(units) => {
                    entries.insert(b.token_address.clone(), units);
                }
                Err(e) => warn!(token = %b.token_address, error = %e, "Skipping malformed balance"),
            }
        }
        Self { entries }
    }

    pub fn base_units(&self, address: &Address) -> Option<f64> {
        self.entries.get(address).copied()
    }

    /// Balance in whole tokens; `0.0` when the address is unknown.
    pub fn amount(&self, address: &Address, decimals: u32) -> f64 {
        self.base_units(address)
            .map(|units| base_units_to_f64(units, decimals))
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
