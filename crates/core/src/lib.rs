pub mod coordinator;
pub mod debounce;
pub mod driver;
pub mod normalizer;
pub mod quote_stats; // opt-in request counters
pub mod routing;
pub mod validate;

pub use coordinator::{AllowanceCheck, AmountEdit, QuoteStatus, SwapError, SwapSession};
pub use driver::{QuoteDriver, SessionCommand, SessionHandle, SessionUpdate};
pub use normalizer::{DashboardView, Normalizer, PricingError};
