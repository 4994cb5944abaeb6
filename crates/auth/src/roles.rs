use serde::{Deserialize, Serialize};

/// Role granted to a principal (e.g. `ADMIN`, `MANAGER`).
///
/// Roles are opaque strings here; what they permit is decided by the
/// downstream authorization layer. Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self(value)
    }
}
