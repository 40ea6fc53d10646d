use pool_dash_core::routing::{decide, AuthState};
use pool_dash_shared::Address;

pub fn run(
    path: &str,
    initialized: bool,
    authenticated: bool,
    account: Option<&str>,
    web3_enabled: bool,
) -> anyhow::Result<()> {
    let auth = AuthState {
        is_initialized: initialized,
        is_authenticated: authenticated,
        account: account.map(Address::new),
        is_web3_enabled: web3_enabled,
    };
    let decision = decide(&auth, path);

    println!("  Enable web3:  {}", decision.enable_web3);
    println!("  Swap allowed: {}", decision.swap_allowed);
    match decision.navigate_to {
        Some(target) => println!("  Navigate to:  {}", target),
        None => println!("  Navigate to:  (stay on {})", path),
    }
    Ok(())
}
