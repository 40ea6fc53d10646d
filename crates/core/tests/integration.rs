use std::collections::HashMap;
use std::sync::Arc;

use pool_dash_core::coordinator::{swap_state_from_snapshot, QuoteStatus, SwapSession};
use pool_dash_core::normalizer::{self, Normalizer};
use pool_dash_core::QuoteDriver;
use pool_dash_quote::LocalQuoter;
use pool_dash_shared::config::{CoordinatorConfig, DisplayConfig};
use pool_dash_shared::format::{format_fixed, format_optional, UNAVAILABLE};
use pool_dash_shared::units::TOKEN_DECIMALS;
use pool_dash_shared::{Address, PoolSnapshot};

const SNAPSHOT: &str = r#"{
    "contract_address": "0xPoolContract",
    "pool_tokens": 1000000,
    "account": "0xUser",
    "assets": [
        {"token_address": "0xABC", "name": "Alpha", "symbol": "ALP",
         "weight": 0.5, "reserve": 250000, "fee": 0.003, "k": 1.25},
        {"token_address": "0xDEF", "name": "Stable", "symbol": "USD",
         "weight": 0.5, "reserve": 500000, "fee": 0.001, "k": 2},
        {"token_address": "0x000", "name": "Drained", "symbol": "DRN",
         "weight": 0.1, "reserve": 0, "fee": 0.002, "k": 1}
    ],
    "balances": [
        {"token_address": "0xabc", "balance": "2500000000000000000"},
        {"token_address": "0xpoolcontract", "balance": "4000000000000000000"}
    ]
}"#;

fn snapshot() -> PoolSnapshot {
    PoolSnapshot::from_json(SNAPSHOT).unwrap()
}

#[test]
fn test_weighted_price_and_case_insensitive_balance() {
    let s = snapshot();
    let n = Normalizer::new(&s, DisplayConfig::default());

    assert_eq!(n.price(&s.assets[0]), Ok(2.0));
    assert_eq!(n.balance(&Address::new("0xABC")), 2.5);
    assert_eq!(n.balance(&Address::new("0xDEF")), 0.0);
    assert_eq!(
        normalizer::balance(&Address::new("0xAbC"), &s.balance_book(), TOKEN_DECIMALS),
        2.5
    );
}

#[test]
fn test_dashboard_in_stable_numeraire() {
    let s = snapshot();
    let n = Normalizer::new(&s, DisplayConfig::default());
    let usd = n.numeraire(Some("Stable (USD)")).unwrap();
    let view = n.view(&usd);

    assert_eq!(view.numeraires.len(), 4);
    assert_eq!(view.numeraires[3].price, None);
    assert_eq!(format_fixed(*view.pool.tvl.as_ref().unwrap(), 2), "1,000,000.00");

    let alpha = &view.rows[0];
    assert_eq!(format_fixed(*alpha.price.as_ref().unwrap(), 2), "2.00");
    assert_eq!(format_fixed(*alpha.reserve.as_ref().unwrap(), 2), "250,000.00");

    let drained = &view.rows[2];
    assert!(drained.price.is_err());
    assert_eq!(format_optional(drained.price.clone().ok(), 2), UNAVAILABLE);
}

#[test]
fn test_selecting_unpriced_numeraire_blanks_every_value() {
    let s = snapshot();
    let n = Normalizer::new(&s, DisplayConfig::default());
    let drained = n.numeraire(Some("Drained (DRN)")).unwrap();
    let view = n.view(&drained);

    assert!(view.pool.tvl.is_err());
    assert!(view.rows.iter().all(|r| r.price.is_err() && r.reserve.is_err()));
}

#[test]
fn test_empty_pool_has_only_pool_token_numeraire() {
    let s = PoolSnapshot::from_json(r#"{"contract_address": "0x1", "pool_tokens": 0}"#).unwrap();
    let n = Normalizer::new(&s, DisplayConfig::default());
    let view = n.view(&n.numeraire(None).unwrap());
    assert_eq!(view.numeraires.len(), 1);
    assert_eq!(view.asset_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_swap_session_with_local_quoter() {
    let s = snapshot();
    let allowances = HashMap::from([(Address::new("0xabc"), 1.0)]);
    let session = SwapSession::new(swap_state_from_snapshot(&s, &allowances, TOKEN_DECIMALS));
    let client = Arc::new(LocalQuoter::from_snapshot(&s));

    let mut handle = QuoteDriver::new(client, session, CoordinatorConfig::default()).spawn();
    handle.edit(Address::new("0xABC"), 2.0).await.unwrap();

    let update = handle.updates.recv().await.unwrap();
    assert_eq!(update.allowance.len(), 1);
    assert_eq!(
        update.allowance[0].message().as_deref(),
        Some("Insufficient allowance (ALP 1)")
    );

    let session = handle.close().await.unwrap();
    match session.status() {
        QuoteStatus::Ready { quote, .. } => {
            // 2 ALP at 2.0 P each, less the 0.3% fee
            assert!((quote.state.pool_token.amount - 3.988).abs() < 1e-9);
            assert_eq!(session.displayed_state(), &quote.state);
            // user-entered pool leg stays as typed
            assert_eq!(session.state().pool_token.amount, 0.0);
        }
        other => panic!("expected a ready quote, got {other:?}"),
    }
}
