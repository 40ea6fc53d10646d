pub mod route;
pub mod show;
pub mod swap;
pub mod validate;

use anyhow::Context;
use pool_dash_shared::PoolSnapshot;

pub(crate) fn load_snapshot(path: &str) -> anyhow::Result<PoolSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path))?;
    PoolSnapshot::from_json(&raw).with_context(|| format!("Invalid snapshot {}", path))
}
