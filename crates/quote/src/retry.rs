use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use crate::client::{Quote, QuoteClient, QuoteRequest};
use crate::error::QuoteError;

/// Calls `client` with a per-attempt `limit`, retrying retryable failures up
/// to `max_retries` extra times.
pub async fn quote_with_retry<C>(
    client: &C,
    request: QuoteRequest,
    limit: Duration,
    max_retries: u32,
) -> Result<Quote, QuoteError>
where
    C: QuoteClient + ?Sized,
{
    let mut attempt = 0u32;
    loop {
        let result = match timeout(limit, client.quote(request.clone())).await {
            Ok(result) => result,
            Err(_) => Err(QuoteError::Timeout(limit)),
        };
        match result {
            Ok(quote) => return Ok(quote),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                warn!(error = %e, attempt, "Quote attempt failed, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}
