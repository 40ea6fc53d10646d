use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use pool_dash_shared::{Address, Asset, PoolSnapshot, SwapToken};

use crate::client::{Quote, QuoteClient, QuoteRequest};
use crate::error::QuoteError;

/// In-process quoter over a fixed pool snapshot.
///
/// Asset legs with a positive amount are priced at the weighted spot price,
/// net of the asset's fee, and summed into the pool token leg. When only the
/// pool token leg is set, it is split across the assets by weight instead.
#[derive(Debug, Clone)]
pub struct LocalQuoter {
    pool_tokens: f64,
    assets: HashMap<Address, Asset>,
}

impl LocalQuoter {
    pub fn new(pool_tokens: f64, assets: impl IntoIterator<Item = Asset>) -> Self {
        Self {
            pool_tokens,
            assets: assets
                .into_iter()
                .map(|a| (a.token_address.clone(), a))
                .collect(),
        }
    }

    pub fn from_snapshot(snapshot: &PoolSnapshot) -> Self {
        Self::new(snapshot.pool_tokens, snapshot.assets.iter().cloned())
    }

    fn price(&self, address: &Address) -> Option<f64> {
        self.assets.get(address)?.spot_price(self.pool_tokens)
    }

    pub fn compute(&self, request: &QuoteRequest) -> Result<Quote, QuoteError> {
        let mut state = request.to_state();
        let mut messages = Vec::new();

        for leg in state.asset_tokens.values_mut() {
            if let Some(asset) = self.assets.get(&leg.address) {
                leg.contract_balance = asset.reserve;
            }
        }

        let paying_assets = state.asset_tokens.values().any(|t| t.amount > 0.0);
        if paying_assets {
            let mut total = 0.0;
            for leg in state.asset_tokens.values().filter(|t| t.amount > 0.0) {
                let Some(asset) = self.assets.get(&leg.address) else {
                    return Err(QuoteError::Rejected(format!("unknown asset {}", leg.address)));
                };
                match self.price(&leg.address) {
                    Some(price) => total += leg.amount * price * (1.0 - asset.fee),
                    None => messages.push(format!("No price for {}", leg.symbol)),
                }
            }
            state.pool_token.amount = total;
        } else if state.pool_token.amount > 0.0 {
            let total_weight: f64 = state
                .asset_tokens
                .keys()
                .filter_map(|a| self.assets.get(a))
                .map(|a| a.weight)
                .sum();
            if total_weight <= 0.0 {
                return Err(QuoteError::Rejected("pool has no weighted assets".into()));
            }
            let pool_amount = state.pool_token.amount;
            for leg in state.asset_tokens.values_mut() {
                let (Some(asset), Some(price)) =
                    (self.assets.get(&leg.address), self.price(&leg.address))
                else {
                    messages.push(format!("No price for {}", leg.symbol));
                    continue;
                };
                leg.amount = pool_amount * asset.weight / total_weight / price;
            }
        }

        messages.extend(
            state
                .legs()
                .filter(|t| t.amount > t.account_balance)
                .map(insufficient_balance),
        );

        debug!(
            pool_amount = state.pool_token.amount,
            n_messages = messages.len(),
            "Local quote computed"
        );
        Ok(Quote { state, messages })
    }
}

fn insufficient_balance(token: &SwapToken) -> String {
    format!(
        "Insufficient balance ({} {})",
        token.symbol, token.account_balance
    )
}

#[async_trait]
impl QuoteClient for LocalQuoter {
    async fn quote(&self, request: QuoteRequest) -> Result<Quote, QuoteError> {
        self.compute(&request)
    }
}
