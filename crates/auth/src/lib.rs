//! `tokengate-auth` — bearer token issuance and verification.
//!
//! Transport-agnostic: no HTTP types live here. The HTTP interceptor in
//! `tokengate-api` builds on [`TokenService`] and [`UserLookup`].

pub mod claims;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod issuer;
pub mod password;
pub mod principal;
pub mod roles;
pub mod service;
pub mod signer;
pub mod signin;
pub mod user;
pub mod verifier;

pub use claims::{Claims, TokenUse};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{ClaimsCodec, TokenRejection};
pub use config::AuthConfig;
pub use error::{AuthError, AuthResult, CodecError, ConfigError, LookupError};
pub use issuer::{CredentialPair, TokenIssuer};
pub use principal::{Principal, resolve_principal};
pub use roles::Role;
pub use service::{BEARER_PREFIX, TokenService, strip_bearer};
pub use signer::{SecretKey, Signer};
pub use signin::SignInService;
pub use user::{InMemoryUserDirectory, UserLookup, UserRecord};
pub use verifier::{TokenStatus, TokenVerifier};
