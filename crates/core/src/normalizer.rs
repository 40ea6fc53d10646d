//! Numeraire-normalized view of pool state.
//!
//! Every displayed quantity is computed in pool-token terms first and then
//! divided by the selected numeraire's own price, so picking an asset as the
//! numeraire re-denominates the whole dashboard in that asset.

use thiserror::Error;

use pool_dash_shared::config::{DisplayConfig, FEE_BPS_SCALE};
use pool_dash_shared::{Address, Asset, BalanceBook, Numeraire, PoolSnapshot};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("asset {0} has an empty reserve, price unavailable")]
    DegenerateReserve(Address),
    #[error("numeraire {0} has no usable price")]
    UnpricedNumeraire(String),
    #[error("unknown numeraire {0:?}")]
    UnknownNumeraire(String),
}

/// Spot price of `asset` in pool tokens.
pub fn price(asset: &Asset, pool_token_supply: f64) -> Result<f64, PricingError> {
    asset
        .spot_price(pool_token_supply)
        .ok_or_else(|| PricingError::DegenerateReserve(asset.token_address.clone()))
}

/// Account balance of `address` in whole tokens. Unknown tokens read as zero.
#[inline]
pub fn balance(address: &Address, book: &BalanceBook, decimals: u32) -> f64 {
    book.amount(address, decimals)
}

/// Divides a pool-token denominated `value` by the numeraire's price.
pub fn normalize(value: f64, numeraire: &Numeraire) -> Result<f64, PricingError> {
    let divisor = numeraire
        .divisor()
        .ok_or_else(|| PricingError::UnpricedNumeraire(numeraire.label()))?;
    Ok(value / divisor)
}

pub fn normalized_price(
    asset: &Asset,
    pool_token_supply: f64,
    numeraire: &Numeraire,
) -> Result<f64, PricingError> {
    normalize(price(asset, pool_token_supply)?, numeraire)
}

pub fn normalized_balance(
    address: &Address,
    book: &BalanceBook,
    decimals: u32,
    numeraire: &Numeraire,
) -> Result<f64, PricingError> {
    normalize(balance(address, book, decimals), numeraire)
}

/// The pool token numeraire followed by one numeraire per asset, in
/// snapshot order. Assets without a computable price stay selectable but
/// carry no price.
pub fn numeraires(assets: Option<&[Asset]>, pool_token_supply: f64) -> Vec<Numeraire> {
    let assets = assets.unwrap_or_default();
    let mut out = Vec::with_capacity(assets.len() + 1);
    out.push(Numeraire::pool_token());
    out.extend(assets.iter().map(|a| Numeraire {
        name: a.name.clone(),
        symbol: a.symbol.clone(),
        price: a.spot_price(pool_token_supply),
    }));
    out
}

/// Looks a numeraire up by its `"Name (SYM)"` label.
pub fn select_numeraire<'a>(
    numeraires: &'a [Numeraire],
    label: &str,
) -> Result<&'a Numeraire, PricingError> {
    numeraires
        .iter()
        .find(|n| n.label() == label)
        .ok_or_else(|| PricingError::UnknownNumeraire(label.to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolPanel {
    /// Account's pool token holdings, present only with an account.
    pub balance: Option<Result<f64, PricingError>>,
    pub tvl: Result<f64, PricingError>,
    pub outstanding: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetRow {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    /// Present only with an account.
    pub balance: Option<Result<f64, PricingError>>,
    pub price: Result<f64, PricingError>,
    pub reserve: Result<f64, PricingError>,
    pub fee_bps: f64,
    pub k: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub numeraire: Numeraire,
    pub numeraires: Vec<Numeraire>,
    pub pool: PoolPanel,
    pub rows: Vec<AssetRow>,
}

impl DashboardView {
    pub fn asset_count(&self) -> usize {
        self.rows.len()
    }
}

/// One render pass over a snapshot. Cheap to build; nothing is cached
/// between passes.
pub struct Normalizer<'a> {
    snapshot: &'a PoolSnapshot,
    book: BalanceBook,
    config: DisplayConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(snapshot: &'a PoolSnapshot, config: DisplayConfig) -> Self {
        Self {
            snapshot,
            book: snapshot.balance_book(),
            config,
        }
    }

    pub fn price(&self, asset: &Asset) -> Result<f64, PricingError> {
        price(asset, self.snapshot.pool_tokens)
    }

    pub fn balance(&self, address: &Address) -> f64 {
        balance(address, &self.book, self.config.token_decimals)
    }

    pub fn numeraires(&self) -> Vec<Numeraire> {
        numeraires(Some(self.snapshot.assets.as_slice()), self.snapshot.pool_tokens)
    }

    /// Resolves a label, or the pool token numeraire when `label` is `None`.
    pub fn numeraire(&self, label: Option<&str>) -> Result<Numeraire, PricingError> {
        match label {
            None => Ok(Numeraire::pool_token()),
            Some(label) => select_numeraire(&self.numeraires(), label).cloned(),
        }
    }

    pub fn view(&self, numeraire: &Numeraire) -> DashboardView {
        let has_account = self.snapshot.account.is_some();
        let pool = PoolPanel {
            balance: has_account
                .then(|| normalize(self.balance(&self.snapshot.contract_address), numeraire)),
            tvl: normalize(self.snapshot.pool_tokens, numeraire),
            outstanding: self.snapshot.pool_tokens,
        };

        let rows = self
            .snapshot
            .assets
            .iter()
            .map(|a| AssetRow {
                address: a.token_address.clone(),
                name: a.name.clone(),
                symbol: a.symbol.clone(),
                balance: has_account.then(|| normalize(self.balance(&a.token_address), numeraire)),
                price: self.price(a).and_then(|p| normalize(p, numeraire)),
                reserve: normalize(a.reserve, numeraire),
                fee_bps: FEE_BPS_SCALE * a.fee,
                k: a.k,
            })
            .collect();

        DashboardView {
            numeraire: numeraire.clone(),
            numeraires: self.numeraires(),
            pool,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use pool_dash_shared::units::TOKEN_DECIMALS;
    use pool_dash_shared::Balance;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;

    fn asset(address: &str, name: &str, weight: f64, reserve: f64) -> Asset {
        Asset {
            token_address: Address::new(address),
            name: name.to_string(),
            symbol: name[..1].to_string(),
            weight,
            reserve,
            fee: 0.003,
            k: 1.5,
        }
    }

    fn snapshot() -> PoolSnapshot {
        PoolSnapshot {
            contract_address: Address::new("0xPool"),
            pool_tokens: 1_000_000.0,
            account: Some(Address::new("0xUser")),
            assets: vec![
                asset("0xAAA", "Alpha", 0.5, 250_000.0),
                asset("0xBBB", "Beta", 0.5, 500_000.0),
            ],
            balances: vec![
                Balance {
                    token_address: Address::new("0xaaa"),
                    balance: "2500000000000000000".into(),
                },
                Balance {
                    token_address: Address::new("0xpool"),
                    balance: "10000000000000000000".into(),
                },
            ],
        }
    }

    #[test]
    fn test_weighted_price_scenario() {
        let a = asset("0xa", "Alpha", 0.5, 250_000.0);
        assert_eq!(price(&a, 1_000_000.0), Ok(2.0));
    }

    #[test]
    fn test_zero_reserve_is_an_error() {
        let a = asset("0xa", "Alpha", 0.5, 0.0);
        assert_eq!(
            price(&a, 1_000_000.0),
            Err(PricingError::DegenerateReserve(Address::new("0xa")))
        );
    }

    #[test]
    fn test_balance_lookup_ignores_case() {
        let book = snapshot().balance_book();
        assert_eq!(balance(&Address::new("0xABC"), &book, TOKEN_DECIMALS), 0.0);
        assert_eq!(balance(&Address::new("0xAAA"), &book, TOKEN_DECIMALS), 2.5);
    }

    #[test]
    fn test_empty_assets_yield_pool_token_only() {
        let list = numeraires(None, 1_000.0);
        assert_eq!(list, vec![Numeraire::pool_token()]);
        let list = numeraires(Some(&[][..]), 1_000.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_numeraire_list_order_and_prices() {
        let s = snapshot();
        let list = numeraires(Some(s.assets.as_slice()), s.pool_tokens);
        let labels: Vec<_> = list.iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["Pool Token (P)", "Alpha (A)", "Beta (B)"]);
        assert_eq!(list[1].price, Some(2.0));
        assert_eq!(list[2].price, Some(1.0));
    }

    #[test]
    fn test_select_unknown_numeraire() {
        let list = numeraires(None, 1.0);
        assert_eq!(
            select_numeraire(&list, "Gamma (G)"),
            Err(PricingError::UnknownNumeraire("Gamma (G)".into()))
        );
    }

    #[test]
    fn test_asset_priced_in_itself_is_one() {
        let mut rng = Pcg64::seed_from_u64(7);
        for _ in 0..200 {
            let supply = rng.gen_range(1.0..1e9);
            let a = asset(
                "0xa",
                "Alpha",
                rng.gen_range(0.01..1.0),
                rng.gen_range(1e-3..1e9),
            );
            let own = numeraires(Some(std::slice::from_ref(&a)), supply).remove(1);
            let p = normalized_price(&a, supply, &own).unwrap();
            assert!((p - 1.0).abs() < 1e-12, "self price {p}");
        }
    }

    #[test]
    fn test_normalized_balance_is_plain_division() {
        let s = snapshot();
        let book = s.balance_book();
        let list = numeraires(Some(s.assets.as_slice()), s.pool_tokens);
        let addr = Address::new("0xaaa");
        for n in &list {
            let expected = balance(&addr, &book, TOKEN_DECIMALS) / n.price.unwrap();
            assert_eq!(normalized_balance(&addr, &book, TOKEN_DECIMALS, n), Ok(expected));
        }
    }

    #[test]
    fn test_unpriced_numeraire_blanks_values() {
        let dead = asset("0xd", "Dead", 0.5, 0.0);
        let list = numeraires(Some(std::slice::from_ref(&dead)), 10.0);
        assert_eq!(list[1].price, None);
        assert!(matches!(
            normalize(5.0, &list[1]),
            Err(PricingError::UnpricedNumeraire(_))
        ));
    }

    #[test]
    fn test_view_in_asset_numeraire() {
        let s = snapshot();
        let normalizer = Normalizer::new(&s, DisplayConfig::default());
        let alpha = normalizer.numeraire(Some("Alpha (A)")).unwrap();
        let view = normalizer.view(&alpha);

        assert_eq!(view.asset_count(), 2);
        assert_eq!(view.pool.tvl, Ok(500_000.0));
        assert_eq!(view.pool.outstanding, 1_000_000.0);
        assert_eq!(view.pool.balance, Some(Ok(5.0)));

        let row = &view.rows[0];
        assert_eq!(row.price, Ok(1.0));
        assert_eq!(row.reserve, Ok(125_000.0));
        assert_eq!(row.balance, Some(Ok(1.25)));
        assert!((row.fee_bps - 30.0).abs() < 1e-9);
        assert_eq!(row.k, 1.5);
        assert_eq!(view.rows[1].price, Ok(0.5));
    }

    #[test]
    fn test_view_without_account_hides_balances() {
        let s = PoolSnapshot {
            account: None,
            ..snapshot()
        };
        let normalizer = Normalizer::new(&s, DisplayConfig::default());
        let view = normalizer.view(&Numeraire::pool_token());
        assert!(view.pool.balance.is_none());
        assert!(view.rows.iter().all(|r| r.balance.is_none()));
    }
}
