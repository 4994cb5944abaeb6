//! Username/password sign-in producing a credential pair.

use std::sync::Arc;

use crate::error::{AuthError, AuthResult};
use crate::issuer::CredentialPair;
use crate::password::verify_password;
use crate::service::TokenService;
use crate::user::UserLookup;

#[derive(Clone)]
pub struct SignInService {
    tokens: TokenService,
    users: Arc<dyn UserLookup>,
}

impl SignInService {
    pub fn new(tokens: TokenService, users: Arc<dyn UserLookup>) -> Self {
        Self { tokens, users }
    }

    /// Check the password and issue a pair carrying the stored roles.
    ///
    /// Unknown user, disabled user and wrong password all return
    /// [`AuthError::BadCredentials`].
    pub async fn sign_in(&self, username: &str, password: &str) -> AuthResult<CredentialPair> {
        let user = match self.users.find_by_subject(username).await? {
            Some(user) if user.enabled => user,
            _ => {
                tracing::info!(username, "sign-in refused: unknown or disabled user");
                return Err(AuthError::BadCredentials);
            }
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::info!(username, "sign-in refused: wrong password");
            return Err(AuthError::BadCredentials);
        }

        self.tokens.create_credential_pair(&user.username, &user.roles)
    }
}
