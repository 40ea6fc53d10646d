use pool_dash_core::Normalizer;
use pool_dash_shared::config::DisplayConfig;

use super::load_snapshot;
use crate::output;

pub fn run(snapshot_path: &str, numeraire: Option<&str>) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot_path)?;
    let config = DisplayConfig::default();
    let fraction_digits = config.fraction_digits;
    let normalizer = Normalizer::new(&snapshot, config);

    let numeraire = normalizer.numeraire(numeraire).map_err(|e| {
        let labels: Vec<String> = normalizer.numeraires().iter().map(|n| n.label()).collect();
        anyhow::anyhow!("{}. Available: {}", e, labels.join(", "))
    })?;

    let view = normalizer.view(&numeraire);
    output::print_dashboard(&view, fraction_digits);
    Ok(())
}
