use std::collections::HashMap;

use pool_dash_shared::result::{Finding, ValidationReport};
use pool_dash_shared::units::{parse_base_units, parse_base_units_lossy};
use pool_dash_shared::PoolSnapshot;

/// Checks a snapshot for data the dashboard cannot render faithfully.
pub fn validate_snapshot(snapshot: &PoolSnapshot) -> ValidationReport {
    let mut findings = Vec::new();

    if !snapshot.pool_tokens.is_finite() || snapshot.pool_tokens < 0.0 {
        findings.push(Finding::failure(
            snapshot.contract_address.as_str(),
            format!("invalid pool token supply {}", snapshot.pool_tokens),
        ));
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for asset in &snapshot.assets {
        let subject = format!("{} ({})", asset.symbol, asset.token_address);
        *seen.entry(asset.token_address.as_str()).or_default() += 1;

        if asset.spot_price(snapshot.pool_tokens).is_none() {
            findings.push(Finding::failure(&subject, "empty reserve, price unavailable"));
        }
        if !(asset.weight.is_finite() && asset.weight > 0.0) {
            findings.push(Finding::warning(
                &subject,
                format!("non-positive weight {}", asset.weight),
            ));
        }
        if !(0.0..1.0).contains(&asset.fee) {
            findings.push(Finding::failure(&subject, format!("fee {} outside [0, 1)", asset.fee)));
        }
    }

    for (address, count) in seen.into_iter().filter(|(_, c)| *c > 1) {
        findings.push(Finding::failure(
            address,
            format!("listed {} times (addresses compare case-insensitively)", count),
        ));
    }

    for balance in &snapshot.balances {
        if let Err(e) = parse_base_units(&balance.balance) {
            let message = match parse_base_units_lossy(&balance.balance) {
                Ok(_) => format!("{}, read approximately", e),
                Err(_) => format!("{}, treated as zero", e),
            };
            findings.push(Finding::warning(balance.token_address.as_str(), message));
        }
    }

    ValidationReport::from_findings(findings, snapshot.assets.len(), snapshot.balances.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_degenerate_and_duplicate_assets() {
        let snapshot = PoolSnapshot::from_json(
            r#"{
                "contract_address": "0xpool",
                "pool_tokens": 1000,
                "assets": [
                    {"token_address": "0xAAA", "name": "Alpha", "symbol": "A",
                     "weight": 0.5, "reserve": 0, "fee": 0.003, "k": 1},
                    {"token_address": "0xaaa", "name": "Alpha2", "symbol": "A2",
                     "weight": 0.5, "reserve": 10, "fee": 0.003, "k": 1}
                ],
                "balances": [{"token_address": "0xaaa", "balance": "1.5"}]
            }"#,
        )
        .unwrap();
        let report = validate_snapshot(&snapshot);

        assert_eq!(report.n_failures(), 2);
        assert_eq!(report.n_warnings(), 1);
        assert!(report.findings.iter().any(|f| f.message.contains("listed 2 times")));
        assert!(report.findings.iter().any(|f| f.message.ends_with("read approximately")));
        assert!(!report.passed());
    }

    #[test]
    fn test_clean_snapshot_passes() {
        let snapshot = PoolSnapshot::from_json(
            r#"{"contract_address": "0xpool", "pool_tokens": 10,
                "assets": [{"token_address": "0xa", "name": "Alpha", "symbol": "A",
                            "weight": 1, "reserve": 5, "fee": 0.001, "k": 2}]}"#,
        )
        .unwrap();
        let report = validate_snapshot(&snapshot);
        assert!(report.passed());
        assert!(report.findings.is_empty());
        assert_eq!(report.n_assets, 1);
    }
}
