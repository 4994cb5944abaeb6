//! Compact token codec: `base64url(header).base64url(payload).base64url(signature)`.
//!
//! Standard HS256 JWTs, produced and parsed with `jsonwebtoken`.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Header, Validation};
use thiserror::Error;

use crate::claims::Claims;
use crate::error::CodecError;
use crate::signer::{ALGORITHM, Signer};

/// Why a token string was refused by [`ClaimsCodec::decode`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Wrong segment count, bad base64, bad JSON, or unsupported algorithm.
    #[error("malformed token")]
    Malformed,

    /// Structurally fine but the signature does not match.
    #[error("signature mismatch")]
    SignatureMismatch,
}

impl From<jsonwebtoken::errors::Error> for TokenRejection {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidSignature => TokenRejection::SignatureMismatch,
            _ => TokenRejection::Malformed,
        }
    }
}

/// Encodes claims into signed token strings and back.
///
/// Expiry is left to the verifier so it can be reported separately.
#[derive(Debug, Clone)]
pub struct ClaimsCodec {
    signer: Signer,
    header: Header,
    validation: Validation,
    structure: Validation,
}

impl ClaimsCodec {
    pub fn new(signer: Signer) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let mut structure = validation.clone();
        structure.insecure_disable_signature_validation();

        Self {
            signer,
            header: Header::new(ALGORITHM),
            validation,
            structure,
        }
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, CodecError> {
        jsonwebtoken::encode(&self.header, claims, self.signer.encoding_key())
            .map_err(|e| CodecError::Serialize(e.to_string()))
    }

    /// Decode and authenticate a token string.
    ///
    /// Segments, base64, header and payload JSON are checked by a first,
    /// unsigned pass; only tokens that survive it get the HMAC check.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenRejection> {
        let unverified =
            jsonwebtoken::decode::<Claims>(token, self.signer.decoding_key(), &self.structure)?;
        if unverified.header.alg != ALGORITHM {
            return Err(TokenRejection::Malformed);
        }

        let verified =
            jsonwebtoken::decode::<Claims>(token, self.signer.decoding_key(), &self.validation)?;
        Ok(verified.claims)
    }
}
