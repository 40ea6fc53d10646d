pub mod address;
pub mod config;
pub mod format;
pub mod model;
pub mod result;
pub mod snapshot;
pub mod units;

pub use address::Address;
pub use model::{Asset, Balance, Numeraire, SwapState, SwapToken};
pub use snapshot::{BalanceBook, PoolSnapshot};
