use std::time::Duration;

use crate::units::TOKEN_DECIMALS;

// Display defaults
pub const POOL_TOKEN_NAME: &str = "Pool Token";
pub const POOL_TOKEN_SYMBOL: &str = "P";
pub const DISPLAY_FRACTION_DIGITS: usize = 2;
pub const FEE_BPS_SCALE: f64 = 10_000.0;

// Quote coordination defaults
pub const QUOTE_DEBOUNCE_MS: u64 = 250;
pub const QUOTE_TIMEOUT_MS: u64 = 5_000;
pub const QUOTE_MAX_RETRIES: u32 = 1;
pub const SESSION_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct DisplayConfig {
    pub token_decimals: u32,
    pub fraction_digits: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            token_decimals: TOKEN_DECIMALS,
            fraction_digits: DISPLAY_FRACTION_DIGITS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Edits closer together than this are coalesced into one quote request.
    pub debounce: Duration,
    pub quote_timeout: Duration,
    /// Extra attempts after a timed-out or failed quote call.
    pub max_retries: u32,
    pub channel_capacity: usize,
    /// Whether allowance overruns are reported. Only an authenticated user
    /// has allowances to speak of.
    pub authenticated: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(QUOTE_DEBOUNCE_MS),
            quote_timeout: Duration::from_millis(QUOTE_TIMEOUT_MS),
            max_retries: QUOTE_MAX_RETRIES,
            channel_capacity: SESSION_CHANNEL_CAPACITY,
            authenticated: true,
        }
    }
}

impl CoordinatorConfig {
    pub fn from_millis(debounce_ms: u64, timeout_ms: u64) -> Self {
        Self {
            debounce: Duration::from_millis(debounce_ms),
            quote_timeout: Duration::from_millis(timeout_ms),
            ..Self::default()
        }
    }
}
