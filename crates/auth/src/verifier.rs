//! Signature, purpose and expiry checks for presented tokens.

use std::sync::Arc;

use crate::claims::{Claims, TokenUse};
use crate::clock::Clock;
use crate::codec::{ClaimsCodec, TokenRejection};
use crate::error::{AuthError, AuthResult};

/// Outcome of inspecting a token.
///
/// Kept internal to logging and tests; public callers only ever see
/// valid/invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    Valid(Claims),
    Expired,
    Malformed,
    SignatureMismatch,
    /// Authentic, but minted for the other purpose.
    WrongUse,
}

impl TokenStatus {
    pub fn kind(&self) -> &'static str {
        match self {
            TokenStatus::Valid(_) => "valid",
            TokenStatus::Expired => "expired",
            TokenStatus::Malformed => "malformed",
            TokenStatus::SignatureMismatch => "signature_mismatch",
            TokenStatus::WrongUse => "wrong_use",
        }
    }
}

impl From<TokenRejection> for TokenStatus {
    fn from(value: TokenRejection) -> Self {
        match value {
            TokenRejection::Malformed => TokenStatus::Malformed,
            TokenRejection::SignatureMismatch => TokenStatus::SignatureMismatch,
        }
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    codec: ClaimsCodec,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    pub fn new(codec: ClaimsCodec, clock: Arc<dyn Clock>) -> Self {
        Self { codec, clock }
    }

    /// Classify a raw (prefix-free) token that must be of kind `expected`.
    pub fn inspect_as(&self, token: &str, expected: TokenUse) -> TokenStatus {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(rejection) => return rejection.into(),
        };
        if claims.token_use != expected {
            return TokenStatus::WrongUse;
        }
        if claims.is_expired_at(self.clock.now()) {
            return TokenStatus::Expired;
        }
        TokenStatus::Valid(claims)
    }

    /// Classify an access token.
    pub fn inspect(&self, token: &str) -> TokenStatus {
        self.inspect_as(token, TokenUse::Access)
    }

    /// Whether `token` is a currently valid access token.
    pub fn verify(&self, token: &str) -> bool {
        matches!(self.inspect(token), TokenStatus::Valid(_))
    }

    /// Verify an access token and return its claims, or a typed error.
    ///
    /// An empty token is reported as [`AuthError::MissingToken`]; every other
    /// failure is [`AuthError::InvalidCredential`].
    pub fn decode_and_authenticate(&self, token: &str) -> AuthResult<Claims> {
        self.authenticate_as(token, TokenUse::Access)
    }

    /// Same as [`Self::decode_and_authenticate`], for refresh tokens.
    pub fn decode_refresh_token(&self, token: &str) -> AuthResult<Claims> {
        self.authenticate_as(token, TokenUse::Refresh)
    }

    fn authenticate_as(&self, token: &str, expected: TokenUse) -> AuthResult<Claims> {
        if token.trim().is_empty() {
            return Err(AuthError::MissingToken);
        }
        match self.inspect_as(token, expected) {
            TokenStatus::Valid(claims) => Ok(claims),
            status => {
                tracing::debug!(status = status.kind(), "token rejected");
                Err(AuthError::InvalidCredential)
            }
        }
    }
}
