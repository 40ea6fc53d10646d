use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical form of a token or contract address: surrounding whitespace
/// stripped, ASCII lower-cased.
pub fn canonicalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// A token or contract address in canonical form.
///
/// Every address that enters the system (assets, balances, swap legs, edit
/// targets) goes through [`canonicalize`], so lookups never depend on the
/// letter case the data provider happened to use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(raw: &str) -> Self {
        Self(canonicalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Address {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_case_addresses_are_equal() {
        assert_eq!(Address::new("0xABC"), Address::new("0xabc"));
        assert_eq!(Address::new("  0xAbC\n"), Address::new("0xabc"));
    }

    #[test]
    fn test_deserialize_canonicalizes() {
        let address: Address = serde_json::from_str("\"0xDeadBeef\"").unwrap();
        assert_eq!(address.as_str(), "0xdeadbeef");
        assert_eq!(serde_json::to_string(&address).unwrap(), "\"0xdeadbeef\"");
    }
}
