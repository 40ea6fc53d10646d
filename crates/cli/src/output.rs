use std::time::Duration;

use pool_dash_core::coordinator::QuoteStatus;
use pool_dash_core::normalizer::PricingError;
use pool_dash_core::{DashboardView, SessionUpdate, SwapSession};
use pool_dash_shared::format::{format_fixed, format_grouped, UNAVAILABLE};
use pool_dash_shared::result::ValidationReport;
use pool_dash_shared::SwapState;

fn cell(value: &Result<f64, PricingError>, fraction_digits: usize) -> String {
    match value {
        Ok(v) => format_fixed(*v, fraction_digits),
        Err(_) => UNAVAILABLE.to_string(),
    }
}

pub fn print_dashboard(view: &DashboardView, fraction_digits: usize) {
    let symbol = &view.numeraire.symbol;

    println!("\n========================================");
    println!("  Liquidity Pool");
    println!("========================================");
    if let Some(balance) = &view.pool.balance {
        println!("  Balance:     {} {}", cell(balance, fraction_digits), symbol);
    }
    println!("  TVL:         {} {}", cell(&view.pool.tvl, fraction_digits), symbol);
    println!("  Outstanding: {}", format_grouped(view.pool.outstanding, 0, 3));
    println!("  Numeraire:   {}", view.numeraire.label());
    let labels: Vec<String> = view.numeraires.iter().map(|n| n.label()).collect();
    println!("  Available:   {}", labels.join(", "));

    println!("\nAsset Tokens: {}", view.asset_count());
    let with_balance = view.pool.balance.is_some();
    let mut header = format!("{:<24}", "Name");
    if with_balance {
        header.push_str(&format!(" {:>18}", format!("Balance ({})", symbol)));
    }
    header.push_str(&format!(
        " {:>18} {:>20} {:>10} {:>10}",
        format!("Price ({})", symbol),
        format!("Reserves ({})", symbol),
        "Fee (bps)",
        "Tuning (k)"
    ));
    println!("{}", header);

    for row in &view.rows {
        let mut line = format!("{:<24}", format!("{} ({})", row.name, row.symbol));
        if let Some(balance) = &row.balance {
            line.push_str(&format!(" {:>18}", cell(balance, fraction_digits)));
        }
        line.push_str(&format!(
            " {:>18} {:>20} {:>10} {:>10}",
            cell(&row.price, fraction_digits),
            cell(&row.reserve, fraction_digits),
            format_grouped(row.fee_bps, 0, 3),
            format_grouped(row.k, 0, 3),
        ));
        println!("{}", line);
    }
}

pub fn print_validation(report: &ValidationReport) {
    println!(
        "  Checked {} asset(s), {} balance(s)",
        report.n_assets, report.n_balances
    );
    for finding in &report.findings {
        println!("  {}", finding);
    }
    if report.findings.is_empty() {
        println!("  [PASS] No findings");
    }
}

fn print_legs(state: &SwapState, fraction_digits: usize) {
    for leg in state.legs() {
        println!(
            "    {:<8} amount={:>16} allowance={:>16} pool={:>16} account={:>16}",
            leg.symbol,
            format_fixed(leg.amount, fraction_digits),
            format_grouped(leg.allowance, 0, 3),
            format_grouped(leg.contract_balance, 0, 3),
            format_grouped(leg.account_balance, 0, 3),
        );
    }
}

pub fn print_update(update: &SessionUpdate) {
    if let Some(error) = &update.error {
        println!("  [ERR ] {}", error);
        return;
    }
    let status = match &update.status {
        QuoteStatus::Idle => "idle".to_string(),
        QuoteStatus::Pending { seq } => format!("pending #{}", seq),
        QuoteStatus::Ready { seq, .. } => format!("ready #{}", seq),
        QuoteStatus::Unavailable { seq, .. } => format!("unavailable #{}", seq),
    };
    println!("  [EDIT] quote {}", status);
    for warning in update.allowance.iter().filter_map(|c| c.message()) {
        println!("  [WARN] {}", warning);
    }
}

pub fn print_session(session: &SwapSession, fraction_digits: usize, elapsed: Duration) {
    println!("\n========================================");
    println!("  Requests:  {}", session.latest_seq());
    println!("  Time:      {:.2}s", elapsed.as_secs_f64());
    match session.status() {
        QuoteStatus::Idle => println!("  Quote:     none requested"),
        QuoteStatus::Pending { seq } => println!("  Quote:     #{} still pending", seq),
        QuoteStatus::Ready { seq, quote } => {
            println!("  Quote:     #{} ready", seq);
            for message in &quote.messages {
                println!("  Note:      {}", message);
            }
        }
        QuoteStatus::Unavailable { seq, reason } => {
            println!("  Quote:     #{} unavailable ({})", seq, reason)
        }
    }
    for warning in session.allowance_warnings().iter().filter_map(|c| c.message()) {
        println!("  Warning:   {}", warning);
    }
    println!("========================================");
    println!("  Entered:");
    print_legs(session.state(), fraction_digits);
    println!("  Displayed:");
    print_legs(session.displayed_state(), fraction_digits);

    if let Some(stats) = pool_dash_core::quote_stats::snapshot_if_enabled() {
        println!("\nQuote stats (POOL_DASH_QUOTE_STATS=1):");
        println!(
            "  issued={} dispatched={} coalesced={} stale_dropped={} failures={}",
            stats.requests_issued,
            stats.requests_dispatched,
            stats.requests_coalesced,
            stats.stale_dropped,
            stats.failures,
        );
    }
}
