use std::collections::BTreeMap;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use pool_dash_shared::{Address, SwapState, SwapToken};

use crate::error::QuoteError;

/// Payload sent to the swap backend. Always the whole swap state, never just
/// the leg that changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub pool_token: SwapToken,
    pub asset_tokens: BTreeMap<Address, SwapToken>,
}

impl From<SwapState> for QuoteRequest {
    fn from(state: SwapState) -> Self {
        Self {
            pool_token: state.pool_token,
            asset_tokens: state.asset_tokens,
        }
    }
}

impl From<&SwapState> for QuoteRequest {
    fn from(state: &SwapState) -> Self {
        state.clone().into()
    }
}

impl QuoteRequest {
    pub fn to_state(&self) -> SwapState {
        SwapState {
            pool_token: self.pool_token.clone(),
            asset_tokens: self.asset_tokens.clone(),
        }
    }
}

/// Backend answer: the legs as the backend would fill them, plus any
/// advisory messages to show alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub state: SwapState,
    #[serde(default)]
    pub messages: Vec<String>,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuoteClient: Send + Sync {
    /// Request a quote for the given swap state.
    async fn quote(&self, request: QuoteRequest) -> Result<Quote, QuoteError>;
}
