//! Minting of access/refresh credential pairs.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::claims::{Claims, TokenUse};
use crate::clock::Clock;
use crate::codec::ClaimsCodec;
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult};
use crate::Role;

/// Credential pair handed back to a client after sign-in or refresh.
///
/// Transport DTO only; nothing here is trusted on the way back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub subject: String,
    pub authenticated: bool,
    pub created_at: DateTime<Utc>,
    /// Expiry of the access token.
    pub expires_at: DateTime<Utc>,
    pub access_token: String,
    pub refresh_token: String,
}

/// Builds and signs credential pairs.
#[derive(Clone)]
pub struct TokenIssuer {
    codec: ClaimsCodec,
    clock: Arc<dyn Clock>,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
    issuer: String,
}

impl TokenIssuer {
    pub fn new(codec: ClaimsCodec, clock: Arc<dyn Clock>, config: &AuthConfig) -> Self {
        Self {
            codec,
            clock,
            access_lifetime: config.access_token_lifetime(),
            refresh_lifetime: config.refresh_token_lifetime(),
            issuer: config.issuer.clone(),
        }
    }

    /// Issue an access and a refresh token sharing one issuance instant.
    pub fn issue(&self, subject: &str, roles: &[Role]) -> AuthResult<CredentialPair> {
        if subject.trim().is_empty() {
            return Err(AuthError::InvalidSubject);
        }

        // Claims carry whole seconds; truncate so the DTO matches the tokens.
        let now = self.clock.now();
        let now = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        let access_expires = now
            .checked_add_signed(self.access_lifetime)
            .ok_or(AuthError::LifetimeOverflow)?;
        let refresh_expires = now
            .checked_add_signed(self.refresh_lifetime)
            .ok_or(AuthError::LifetimeOverflow)?;

        let access = Claims {
            sub: subject.to_string(),
            roles: roles.to_vec(),
            token_use: TokenUse::Access,
            iat: now.timestamp(),
            exp: access_expires.timestamp(),
            iss: Some(self.issuer.clone()),
        };
        let refresh = Claims {
            token_use: TokenUse::Refresh,
            exp: refresh_expires.timestamp(),
            iss: None,
            ..access.clone()
        };

        let pair = CredentialPair {
            subject: subject.to_string(),
            authenticated: true,
            created_at: now,
            expires_at: access_expires,
            access_token: self.codec.encode(&access)?,
            refresh_token: self.codec.encode(&refresh)?,
        };

        tracing::debug!(subject, expires_at = %access_expires, "issued credential pair");
        Ok(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::{SecretKey, Signer};

    fn setup() -> (TokenIssuer, ClaimsCodec) {
        let codec = ClaimsCodec::new(Signer::new(SecretKey::from_seed("seed").unwrap()));
        let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 250_000_000).unwrap());
        let config = AuthConfig::new("seed", Duration::hours(10))
            .unwrap()
            .with_issuer("https://auth.example.com");
        (TokenIssuer::new(codec.clone(), Arc::new(clock), &config), codec)
    }

    #[test]
    fn access_and_refresh_share_issuance_and_differ_in_expiry() {
        let (issuer, codec) = setup();
        let pair = issuer.issue("alice", &[Role::new("ADMIN")]).unwrap();

        let access = codec.decode(&pair.access_token).unwrap();
        let refresh = codec.decode(&pair.refresh_token).unwrap();

        assert_eq!(access.iat, 1_700_000_000);
        assert_eq!(access.iat, refresh.iat);
        assert_eq!(access.exp - access.iat, 10 * 3600);
        assert_eq!(refresh.exp - refresh.iat, 30 * 3600);
        assert_eq!(access.sub, refresh.sub);
        assert_eq!(access.roles, refresh.roles);
        assert_eq!(access.iss.as_deref(), Some("https://auth.example.com"));
        assert_eq!(refresh.iss, None);
        assert_eq!(access.token_use, TokenUse::Access);
        assert_eq!(refresh.token_use, TokenUse::Refresh);
    }

    #[test]
    fn pair_bookkeeping_matches_access_claims() {
        let (issuer, codec) = setup();
        let pair = issuer.issue("alice", &[]).unwrap();
        let access = codec.decode(&pair.access_token).unwrap();

        assert!(pair.authenticated);
        assert_eq!(pair.subject, "alice");
        assert_eq!(pair.created_at, access.issued_at());
        assert_eq!(pair.expires_at, access.expires_at());
    }

    #[test]
    fn pair_serializes_with_camel_case_fields() {
        let (issuer, _) = setup();
        let pair = issuer.issue("alice", &[]).unwrap();
        let json = serde_json::to_value(&pair).unwrap();
        for field in ["subject", "authenticated", "createdAt", "expiresAt", "accessToken", "refreshToken"] {
            assert!(json.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn expiry_past_the_end_of_time_is_an_error() {
        let (_, codec) = setup();
        let clock = ManualClock::new(DateTime::<Utc>::MAX_UTC - Duration::hours(20));
        let config = AuthConfig::new("seed", Duration::hours(10)).unwrap();
        let issuer = TokenIssuer::new(codec, Arc::new(clock), &config);

        // The access expiry still fits; the refresh one does not.
        assert_eq!(issuer.issue("alice", &[]).unwrap_err(), AuthError::LifetimeOverflow);
    }

    #[test]
    fn empty_subject_is_a_contract_violation() {
        let (issuer, _) = setup();
        assert_eq!(issuer.issue("  ", &[]).unwrap_err(), AuthError::InvalidSubject);
    }
}
