use serde::{Deserialize, Serialize};
use std::fmt;

/// An account name as seen by the ledger.
///
/// Identities are opaque to the engine. The only structure it cares about is
/// the null identity: the empty string or a `0x` hex string made only of
/// zeros, which can never receive funds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The canonical null identity (the 20-byte zero address).
    pub fn null() -> Self {
        Self(format!("0x{}", "0".repeat(40)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        let name = self.0.trim();
        if name.is_empty() {
            return true;
        }
        match name.strip_prefix("0x").or_else(|| name.strip_prefix("0X")) {
            Some(digits) => !digits.is_empty() && digits.chars().all(|c| c == '0'),
            None => false,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Identity {
    fn from(name: String) -> Self {
        Self(name)
    }
}
