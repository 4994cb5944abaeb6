//! Boundary operations: create, refresh and authenticate.

use std::sync::Arc;

use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};
use crate::codec::ClaimsCodec;
use crate::config::AuthConfig;
use crate::error::{AuthError, AuthResult, ConfigError};
use crate::issuer::{CredentialPair, TokenIssuer};
use crate::signer::{SecretKey, Signer};
use crate::verifier::{TokenStatus, TokenVerifier};
use crate::Role;

/// Prefix of an `Authorization` header carrying a bearer token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Strip the bearer prefix, returning the trimmed remainder.
pub fn strip_bearer(value: &str) -> Option<&str> {
    value.strip_prefix(BEARER_PREFIX).map(str::trim)
}

/// Token issuance and verification sharing one key and one clock.
#[derive(Clone)]
pub struct TokenService {
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let signer = Signer::new(SecretKey::from_seed(&config.secret)?);
        let codec = ClaimsCodec::new(signer);
        Ok(Self {
            issuer: TokenIssuer::new(codec.clone(), clock.clone(), config),
            verifier: TokenVerifier::new(codec, clock),
        })
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    pub fn create_credential_pair(&self, subject: &str, roles: &[Role]) -> AuthResult<CredentialPair> {
        self.issuer.issue(subject, roles)
    }

    /// Mint a fresh pair from a `Bearer <refresh token>` value.
    ///
    /// Only refresh tokens are accepted. Subject and roles come from the
    /// refresh token itself. The presented token stays usable until its own
    /// expiry.
    pub fn refresh_credential_pair(&self, bearer_refresh_token: &str) -> AuthResult<CredentialPair> {
        let token = strip_bearer(bearer_refresh_token).ok_or(AuthError::InvalidCredential)?;
        let claims = self.verifier.decode_refresh_token(token)?;
        tracing::info!(subject = %claims.sub, "refreshing credential pair");
        self.issuer.issue(&claims.sub, &claims.roles)
    }

    /// Claims of a valid `Bearer <access token>`, or `None`. Refresh tokens
    /// are never accepted here.
    pub fn authenticate(&self, bearer_access_token: &str) -> Option<Claims> {
        let token = strip_bearer(bearer_access_token)?;
        match self.verifier.inspect(token) {
            TokenStatus::Valid(claims) => Some(claims),
            status => {
                tracing::debug!(status = status.kind(), "bearer token not accepted");
                None
            }
        }
    }
}
