mod commands;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pool-dash", about = "Liquidity pool dashboard and multi-asset swap CLI")]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pool dashboard for a snapshot
    Show {
        /// Path to the pool snapshot JSON
        #[arg(long)]
        snapshot: String,
        /// Numeraire label, e.g. "Alpha (ALP)" (default: pool token)
        #[arg(long)]
        numeraire: Option<String>,
    },
    /// Check a snapshot for degenerate or inconsistent data
    Validate {
        /// Path to the pool snapshot JSON
        #[arg(long)]
        snapshot: String,
    },
    /// Replay amount edits through a swap session
    Swap {
        /// Path to the pool snapshot JSON
        #[arg(long)]
        snapshot: String,
        /// Path to the edit script JSON
        #[arg(long)]
        edits: String,
        /// Quote debounce window
        #[arg(long, default_value = "250")]
        debounce_ms: u64,
        /// Per-attempt quote timeout
        #[arg(long, default_value = "5000")]
        timeout_ms: u64,
        /// Treat the user as signed out (no allowance warnings)
        #[arg(long)]
        signed_out: bool,
    },
    /// Decide where an auth change should navigate
    Route {
        /// Current path
        #[arg(long, default_value = "/dashboard")]
        path: String,
        #[arg(long)]
        initialized: bool,
        #[arg(long)]
        authenticated: bool,
        /// Connected account address
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        web3_enabled: bool,
    },
}

fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging subscriber: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Show {
            snapshot,
            numeraire,
        } => commands::show::run(&snapshot, numeraire.as_deref()),
        Commands::Validate { snapshot } => commands::validate::run(&snapshot),
        Commands::Swap {
            snapshot,
            edits,
            debounce_ms,
            timeout_ms,
            signed_out,
        } => commands::swap::run(&snapshot, &edits, debounce_ms, timeout_ms, signed_out),
        Commands::Route {
            path,
            initialized,
            authenticated,
            account,
            web3_enabled,
        } => commands::route::run(
            &path,
            initialized,
            authenticated,
            account.as_deref(),
            web3_enabled,
        ),
    }
}
