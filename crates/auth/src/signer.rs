//! HMAC-SHA256 signing over encoded token bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, crypto};

use crate::error::{CodecError, ConfigError};

/// Signing algorithm used for every token.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// Process-wide symmetric signing key.
///
/// Built once at startup from the configured seed and handed to a [`Signer`].
/// The raw material is not kept around and cannot be read back.
#[derive(Clone)]
pub struct SecretKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SecretKey {
    /// Derive the key from a seed string.
    ///
    /// The key bytes are the standard base64 encoding of the seed.
    pub fn from_seed(seed: &str) -> Result<Self, ConfigError> {
        if seed.trim().is_empty() {
            return Err(ConfigError::BlankSecret);
        }
        let material = STANDARD.encode(seed.as_bytes());
        Ok(Self {
            encoding: EncodingKey::from_secret(material.as_bytes()),
            decoding: DecodingKey::from_secret(material.as_bytes()),
        })
    }
}

impl core::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Produces and checks message authentication codes.
///
/// Immutable after construction; share freely across tasks.
#[derive(Debug, Clone)]
pub struct Signer {
    key: SecretKey,
}

impl Signer {
    pub fn new(key: SecretKey) -> Self {
        Self { key }
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.key.encoding
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.key.decoding
    }

    /// Signature of `payload`, base64url encoded.
    pub fn sign(&self, payload: &[u8]) -> Result<String, CodecError> {
        crypto::sign(payload, &self.key.encoding, ALGORITHM)
            .map_err(|e| CodecError::Serialize(e.to_string()))
    }

    /// Check a base64url `signature` against `payload`.
    ///
    /// Undecodable signatures count as a mismatch.
    pub fn verify(&self, payload: &[u8], signature: &str) -> bool {
        crypto::verify(signature, payload, &self.key.decoding, ALGORITHM).unwrap_or(false)
    }
}
