//! Runtime configuration for token issuance.

use chrono::{Duration, TimeDelta, Utc};

use crate::error::ConfigError;

/// Refresh tokens live this many access lifetimes.
pub const REFRESH_LIFETIME_MULTIPLIER: i32 = 3;

/// Default access token lifetime: 10 hours.
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 10 * 60 * 60;

pub const DEFAULT_ISSUER: &str = "http://localhost:8080";

const DEV_SECRET: &str = "dev-secret";

/// Token configuration supplied at process start.
#[derive(Clone)]
pub struct AuthConfig {
    /// Seed the signing key is derived from.
    pub secret: String,
    access_token_lifetime: Duration,
    /// Value written into the `iss` claim of access tokens.
    pub issuer: String,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, access_token_lifetime: Duration) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::BlankSecret);
        }
        if access_token_lifetime <= Duration::zero() {
            return Err(ConfigError::NonPositiveLifetime);
        }
        // Both expiry instants must stay representable from today on.
        let fits = access_token_lifetime
            .checked_mul(REFRESH_LIFETIME_MULTIPLIER)
            .and_then(|refresh| Utc::now().checked_add_signed(refresh))
            .is_some();
        if !fits {
            return Err(ConfigError::LifetimeTooLarge);
        }
        Ok(Self {
            secret,
            access_token_lifetime,
            issuer: DEFAULT_ISSUER.to_string(),
        })
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn access_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
    }

    /// Always derived from the access lifetime, never configured.
    pub fn refresh_token_lifetime(&self) -> Duration {
        self.access_token_lifetime
            .checked_mul(REFRESH_LIFETIME_MULTIPLIER)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Read `TOKENGATE_JWT_SECRET`, `TOKENGATE_ACCESS_TTL_SECS` and
    /// `TOKENGATE_ISSUER` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = var("TOKENGATE_JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("TOKENGATE_JWT_SECRET not set; using insecure dev default");
            DEV_SECRET.to_string()
        });

        let ttl_secs = match var("TOKENGATE_ACCESS_TTL_SECS") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|e| ConfigError::InvalidValue {
                name: "TOKENGATE_ACCESS_TTL_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_ACCESS_TTL_SECS,
        };

        let ttl = TimeDelta::try_seconds(ttl_secs).ok_or(ConfigError::InvalidValue {
            name: "TOKENGATE_ACCESS_TTL_SECS",
            reason: format!("{ttl_secs} seconds is out of range"),
        })?;

        let config = Self::new(secret, ttl)?;
        Ok(match var("TOKENGATE_ISSUER") {
            Some(issuer) if !issuer.trim().is_empty() => config.with_issuer(issuer.trim()),
            _ => config,
        })
    }
}

impl core::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &"<redacted>")
            .field("access_token_lifetime", &self.access_token_lifetime)
            .field("issuer", &self.issuer)
            .finish()
    }
}
