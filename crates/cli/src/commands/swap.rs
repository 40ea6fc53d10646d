use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use pool_dash_core::coordinator::{swap_state_from_snapshot, SwapSession};
use pool_dash_core::{quote_stats, QuoteDriver};
use pool_dash_quote::LocalQuoter;
use pool_dash_shared::config::{CoordinatorConfig, DisplayConfig};
use pool_dash_shared::Address;

use super::load_snapshot;
use crate::output;

#[derive(Debug, Deserialize)]
struct EditScript {
    #[serde(default)]
    allowances: HashMap<Address, f64>,
    edits: Vec<ScriptedEdit>,
}

#[derive(Debug, Deserialize)]
struct ScriptedEdit {
    address: Address,
    amount: f64,
    /// Pause before this edit, as if the user were typing.
    #[serde(default)]
    delay_ms: u64,
}

pub fn run(
    snapshot_path: &str,
    edits_path: &str,
    debounce_ms: u64,
    timeout_ms: u64,
    signed_out: bool,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot_path)?;
    let raw = std::fs::read_to_string(edits_path)
        .with_context(|| format!("Failed to read edit script {}", edits_path))?;
    let script: EditScript =
        serde_json::from_str(&raw).with_context(|| format!("Invalid edit script {}", edits_path))?;

    let display = DisplayConfig::default();
    let state = swap_state_from_snapshot(&snapshot, &script.allowances, display.token_decimals);
    let config = CoordinatorConfig {
        authenticated: !signed_out,
        ..CoordinatorConfig::from_millis(debounce_ms, timeout_ms)
    };
    let client = Arc::new(LocalQuoter::from_snapshot(&snapshot));

    println!(
        "Replaying {} edit(s) over {} swap leg(s)...",
        script.edits.len(),
        state.asset_tokens.len() + 1,
    );

    // Single-threaded event loop, like the UI it stands in for.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    quote_stats::reset();
    let start = std::time::Instant::now();
    let session = runtime.block_on(async move {
        let mut handle = QuoteDriver::new(client, SwapSession::new(state), config).spawn();
        for edit in script.edits {
            if edit.delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(edit.delay_ms)).await;
            }
            handle.edit(edit.address, edit.amount).await?;
            // every edit publishes at least one update
            if let Some(update) = handle.updates.recv().await {
                output::print_update(&update);
            }
            while let Ok(update) = handle.updates.try_recv() {
                output::print_update(&update);
            }
        }
        // trailing updates, including quotes that settle while closing
        handle
            .close_draining(|update| output::print_update(&update))
            .await
    })?;
    let elapsed = start.elapsed();

    output::print_session(&session, display.fraction_digits, elapsed);
    Ok(())
}
