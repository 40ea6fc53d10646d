pub mod client;
pub mod error;
pub mod local;
pub mod retry;

pub use client::{Quote, QuoteClient, QuoteRequest};
pub use error::QuoteError;
pub use local::LocalQuoter;
pub use retry::quote_with_retry;
