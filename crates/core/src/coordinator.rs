use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use pool_dash_quote::{Quote, QuoteError, QuoteRequest};
use pool_dash_shared::config::POOL_TOKEN_SYMBOL;
use pool_dash_shared::{Address, PoolSnapshot, SwapState, SwapToken};

use crate::quote_stats;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwapError {
    #[error("no swap leg with address {0}")]
    UnknownLeg(Address),
    #[error("amount {amount} for {address} must be a finite, non-negative number")]
    InvalidAmount { address: Address, amount: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AllowanceCheck {
    Sufficient,
    Insufficient { symbol: String, allowance: f64 },
}

impl AllowanceCheck {
    pub fn of(token: &SwapToken) -> Self {
        if token.exceeds_allowance() {
            AllowanceCheck::Insufficient {
                symbol: token.symbol.clone(),
                allowance: token.allowance,
            }
        } else {
            AllowanceCheck::Sufficient
        }
    }

    pub fn message(&self) -> Option<String> {
        match self {
            AllowanceCheck::Sufficient => None,
            AllowanceCheck::Insufficient { symbol, allowance } => {
                Some(format!("Insufficient allowance ({} {})", symbol, allowance))
            }
        }
    }
}

/// A quote request tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteTicket {
    pub seq: u64,
    pub request: QuoteRequest,
}

/// Result of one amount edit.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountEdit {
    pub state: SwapState,
    pub allowance: AllowanceCheck,
    pub ticket: QuoteTicket,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QuoteStatus {
    Idle,
    Pending { seq: u64 },
    Ready { seq: u64, quote: Quote },
    Unavailable { seq: u64, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteOutcome {
    Applied,
    Stale { seq: u64, latest: u64 },
}

/// Owns the swap state for one swap dialog.
///
/// Idle -> (edit) -> QuoteRequested -> Idle. Every edit goes through
/// [`SwapSession::apply_amount_edit`] and produces a new immutable state plus
/// a sequenced quote request. Only the response to the latest request is
/// ever shown.
#[derive(Debug, Clone)]
pub struct SwapSession {
    state: SwapState,
    latest_seq: u64,
    status: QuoteStatus,
    authenticated: bool,
}

impl SwapSession {
    pub fn new(state: SwapState) -> Self {
        Self {
            state,
            latest_seq: 0,
            status: QuoteStatus::Idle,
            authenticated: true,
        }
    }

    pub fn with_authenticated(mut self, authenticated: bool) -> Self {
        self.authenticated = authenticated;
        self
    }

    pub fn state(&self) -> &SwapState {
        &self.state
    }

    pub fn status(&self) -> &QuoteStatus {
        &self.status
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn apply_amount_edit(
        &mut self,
        address: &Address,
        amount: f64,
    ) -> Result<AmountEdit, SwapError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(SwapError::InvalidAmount {
                address: address.clone(),
                amount,
            });
        }
        let next = self
            .state
            .with_amount(address, amount)
            .ok_or_else(|| SwapError::UnknownLeg(address.clone()))?;

        let allowance = match next.leg(address) {
            Some(leg) if self.authenticated => AllowanceCheck::of(leg),
            _ => AllowanceCheck::Sufficient,
        };

        self.latest_seq += 1;
        self.state = next;
        self.status = QuoteStatus::Pending {
            seq: self.latest_seq,
        };
        quote_stats::inc_requests_issued();
        debug!(%address, amount, seq = self.latest_seq, "Applied amount edit");

        Ok(AmountEdit {
            state: self.state.clone(),
            allowance,
            ticket: QuoteTicket {
                seq: self.latest_seq,
                request: QuoteRequest::from(&self.state),
            },
        })
    }

    /// Applies a quote response if it answers the latest request.
    pub fn accept_quote(&mut self, seq: u64, result: Result<Quote, QuoteError>) -> QuoteOutcome {
        if seq != self.latest_seq {
            quote_stats::inc_stale_dropped();
            debug!(seq, latest = self.latest_seq, "Dropping stale quote response");
            return QuoteOutcome::Stale {
                seq,
                latest: self.latest_seq,
            };
        }
        self.status = match result {
            Ok(quote) => QuoteStatus::Ready { seq, quote },
            Err(e) => {
                quote_stats::inc_failures();
                warn!(seq, error = %e, "Quote unavailable");
                QuoteStatus::Unavailable {
                    seq,
                    reason: e.to_string(),
                }
            }
        };
        QuoteOutcome::Applied
    }

    /// Per-leg allowance overruns in the current state.
    pub fn allowance_warnings(&self) -> Vec<AllowanceCheck> {
        if !self.authenticated {
            return Vec::new();
        }
        self.state
            .legs()
            .map(AllowanceCheck::of)
            .filter(|c| *c != AllowanceCheck::Sufficient)
            .collect()
    }

    /// What the swap form should show: the latest quote's legs when one is
    /// ready, otherwise the amounts as entered.
    pub fn displayed_state(&self) -> &SwapState {
        match &self.status {
            QuoteStatus::Ready { quote, .. } => &quote.state,
            _ => &self.state,
        }
    }
}

/// Builds the initial swap state for a snapshot. Unknown allowances are zero.
pub fn swap_state_from_snapshot(
    snapshot: &PoolSnapshot,
    allowances: &HashMap<Address, f64>,
    decimals: u32,
) -> SwapState {
    let book = snapshot.balance_book();
    let allowance = |a: &Address| allowances.get(a).copied().unwrap_or(0.0);

    let pool_token = SwapToken {
        address: snapshot.contract_address.clone(),
        symbol: POOL_TOKEN_SYMBOL.to_string(),
        amount: 0.0,
        allowance: allowance(&snapshot.contract_address),
        contract_balance: snapshot.pool_tokens,
        account_balance: book.amount(&snapshot.contract_address, decimals),
    };
    let assets = snapshot.assets.iter().map(|a| SwapToken {
        address: a.token_address.clone(),
        symbol: a.symbol.clone(),
        amount: 0.0,
        allowance: allowance(&a.token_address),
        contract_balance: a.reserve,
        account_balance: book.amount(&a.token_address, decimals),
    });
    SwapState::new(pool_token, assets)
}
