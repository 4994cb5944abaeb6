use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Role;

/// What a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUse {
    /// Authorizes ordinary requests.
    Access,
    /// Authorizes only minting a new credential pair.
    Refresh,
}

/// Payload carried inside a signed token.
///
/// Field order here is the serialisation order, so encoding the same claims
/// twice yields identical bytes. Timestamps are whole seconds since the Unix
/// epoch (UTC), matching the registered `iat`/`exp` claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject / principal name.
    pub sub: String,

    /// Roles granted at issuance time (a snapshot, not a live lookup).
    #[serde(default)]
    pub roles: Vec<Role>,

    /// Access or refresh. Tokens without it are rejected.
    pub token_use: TokenUse,

    /// Issued-at, seconds since epoch.
    pub iat: i64,

    /// Expiration, seconds since epoch.
    pub exp: i64,

    /// Minting service. Informational; refresh tokens omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// A token is only valid while `exp` is strictly after `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
