use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::config::{POOL_TOKEN_NAME, POOL_TOKEN_SYMBOL};

/// One pool asset as reported by the on-chain data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub token_address: Address,
    pub name: String,
    pub symbol: String,
    pub weight: f64,
    pub reserve: f64,
    /// Swap fee as a fraction, e.g. `0.003`.
    pub fee: f64,
    /// Curve tuning parameter.
    pub k: f64,
}

impl Asset {
    /// Constant-weight spot price in pool tokens: `supply * weight / reserve`.
    /// `None` when the reserve is empty or the result is not finite.
    pub fn spot_price(&self, pool_token_supply: f64) -> Option<f64> {
        if self.reserve == 0.0 {
            return None;
        }
        let price = pool_token_supply * self.weight / self.reserve;
        price.is_finite().then_some(price)
    }
}

/// An account balance in base units (18-decimal fixed point).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub token_address: Address,
    pub balance: String,
}

/// The unit of account every displayed value is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Numeraire {
    pub name: String,
    pub symbol: String,
    /// Price of one unit of this numeraire in pool tokens. Pool-token
    /// denominated values are divided by it. `None` when the underlying
    /// asset has no computable price.
    pub price: Option<f64>,
}

impl Numeraire {
    pub fn pool_token() -> Self {
        Self {
            name: POOL_TOKEN_NAME.to_string(),
            symbol: POOL_TOKEN_SYMBOL.to_string(),
            price: Some(1.0),
        }
    }

    /// Selection label, `"Name (SYM)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }

    /// The price if it can safely be divided by.
    #[inline]
    pub fn divisor(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p > 0.0)
    }
}

impl Default for Numeraire {
    fn default() -> Self {
        Self::pool_token()
    }
}

/// One leg of a multi-asset swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapToken {
    pub address: Address,
    pub symbol: String,
    pub amount: f64,
    pub allowance: f64,
    pub contract_balance: f64,
    pub account_balance: f64,
}

impl SwapToken {
    pub fn new(address: Address, symbol: impl Into<String>) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            amount: 0.0,
            allowance: 0.0,
            contract_balance: 0.0,
            account_balance: 0.0,
        }
    }

    pub fn exceeds_allowance(&self) -> bool {
        self.amount > self.allowance
    }
}

/// Full swap session state: the pool token leg plus every asset leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapState {
    pub pool_token: SwapToken,
    pub asset_tokens: BTreeMap<Address, SwapToken>,
}

impl SwapState {
    pub fn new(pool_token: SwapToken, assets: impl IntoIterator<Item = SwapToken>) -> Self {
        let asset_tokens = assets.into_iter().map(|t| (t.address.clone(), t)).collect();
        Self {
            pool_token,
            asset_tokens,
        }
    }

    pub fn leg(&self, address: &Address) -> Option<&SwapToken> {
        if *address == self.pool_token.address {
            Some(&self.pool_token)
        } else {
            self.asset_tokens.get(address)
        }
    }

    /// Copy of this state with `amount` written onto the leg at `address`,
    /// or `None` if no leg has that address.
    pub fn with_amount(&self, address: &Address, amount: f64) -> Option<SwapState> {
        let mut next = self.clone();
        let leg = if *address == next.pool_token.address {
            &mut next.pool_token
        } else {
            next.asset_tokens.get_mut(address)?
        };
        leg.amount = amount;
        Some(next)
    }

    pub fn legs(&self) -> impl Iterator<Item = &SwapToken> {
        std::iter::once(&self.pool_token).chain(self.asset_tokens.values())
    }
}
