//! Error model for token issuance, verification and sign-in.

use thiserror::Error;

/// Result type used across the auth crate.
pub type AuthResult<T> = Result<T, AuthError>;

/// Boundary-level authentication error.
///
/// Routine validation failures (forged, expired, garbled tokens) all collapse
/// into [`AuthError::InvalidCredential`]; callers never learn which check
/// failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No token was supplied at all (empty string after the bearer prefix).
    #[error("missing token")]
    MissingToken,

    /// The token is expired, forged, or structurally invalid.
    #[error("expired or invalid token")]
    InvalidCredential,

    /// A token was requested for an empty subject.
    #[error("subject must not be empty")]
    InvalidSubject,

    /// Sign-in failed (unknown user, disabled user, or wrong password).
    #[error("invalid username or password")]
    BadCredentials,

    #[error("token encoding failed: {0}")]
    Codec(#[from] CodecError),

    #[error("user lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// An expiry instant fell outside the representable date range.
    #[error("token lifetime overflows the clock range")]
    LifetimeOverflow,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Failure while producing a token string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("serialize: {0}")]
    Serialize(String),
}

/// Failure reported by a [`crate::UserLookup`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

/// Invalid configuration detected at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("signing secret must not be blank")]
    BlankSecret,

    #[error("access token lifetime must be positive")]
    NonPositiveLifetime,

    #[error("access token lifetime is too large")]
    LifetimeTooLarge,

    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}
