use pool_dash_shared::Address;

pub const DASHBOARD_PATH: &str = "/dashboard";

/// Authentication state as reported by the wallet provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_initialized: bool,
    pub is_authenticated: bool,
    pub account: Option<Address>,
    pub is_web3_enabled: bool,
}

/// What the caller should do after an auth change. Applying it is up to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub enable_web3: bool,
    pub navigate_to: Option<String>,
    pub swap_allowed: bool,
}

pub fn target_path(auth: &AuthState, pathname: &str) -> String {
    match (auth.is_authenticated, &auth.account) {
        (true, Some(account)) => format!("{}/{}", DASHBOARD_PATH, account),
        (true, None) => pathname.to_string(),
        (false, _) => DASHBOARD_PATH.to_string(),
    }
}

pub fn decide(auth: &AuthState, pathname: &str) -> RouteDecision {
    let target = target_path(auth, pathname);
    RouteDecision {
        enable_web3: auth.is_authenticated && !auth.is_web3_enabled,
        navigate_to: (auth.is_initialized && target != pathname).then_some(target),
        swap_allowed: auth.is_authenticated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(authenticated: bool, account: Option<&str>) -> AuthState {
        AuthState {
            is_initialized: true,
            is_authenticated: authenticated,
            account: account.map(Address::new),
            is_web3_enabled: true,
        }
    }

    #[test]
    fn test_authenticated_goes_to_account_dashboard() {
        let d = decide(&auth(true, Some("0xUser")), "/dashboard");
        assert_eq!(d.navigate_to.as_deref(), Some("/dashboard/0xuser"));
        assert!(d.swap_allowed);
        assert!(!d.enable_web3);
    }

    #[test]
    fn test_already_on_target_does_not_navigate() {
        let d = decide(&auth(true, Some("0xuser")), "/dashboard/0xuser");
        assert_eq!(d.navigate_to, None);
    }

    #[test]
    fn test_authenticated_without_account_stays() {
        let d = decide(&auth(true, None), "/dashboard/0xold");
        assert_eq!(d.navigate_to, None);
    }

    #[test]
    fn test_signed_out_returns_to_dashboard() {
        let d = decide(&auth(false, Some("0xuser")), "/dashboard/0xuser");
        assert_eq!(d.navigate_to.as_deref(), Some("/dashboard"));
        assert!(!d.swap_allowed);
    }

    #[test]
    fn test_uninitialized_never_navigates() {
        let state = AuthState {
            is_initialized: false,
            ..auth(false, None)
        };
        assert_eq!(decide(&state, "/dashboard/0xuser").navigate_to, None);
    }

    #[test]
    fn test_enables_web3_when_missing() {
        let state = AuthState {
            is_web3_enabled: false,
            ..auth(true, Some("0xuser"))
        };
        assert!(decide(&state, "/").enable_web3);
        let signed_out = AuthState {
            is_web3_enabled: false,
            ..auth(false, None)
        };
        assert!(!decide(&signed_out, "/").enable_web3);
    }
}
