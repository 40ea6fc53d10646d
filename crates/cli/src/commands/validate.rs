use pool_dash_core::validate::validate_snapshot;

use super::load_snapshot;
use crate::output;

pub fn run(snapshot_path: &str) -> anyhow::Result<()> {
    println!("Validating snapshot {}...", snapshot_path);
    let snapshot = load_snapshot(snapshot_path)?;
    let report = validate_snapshot(&snapshot);
    output::print_validation(&report);

    if !report.passed() {
        anyhow::bail!("FAIL: {} problem(s) found", report.n_failures());
    }
    println!("\nAll validation checks passed!");
    Ok(())
}
