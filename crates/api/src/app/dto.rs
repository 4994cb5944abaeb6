use serde::{Deserialize, Serialize};

use tokengate_auth::Role;

use crate::context::PrincipalContext;

// -------------------------
// Request DTOs
// -------------------------

/// Sign-in body. Fields are optional so blank input gets a uniform answer.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SignInRequest {
    /// Username and password, if both are non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse<'a> {
    pub subject: &'a str,
    pub roles: &'a [Role],
    pub token_roles: &'a [Role],
}

impl<'a> From<&'a PrincipalContext> for WhoAmIResponse<'a> {
    fn from(p: &'a PrincipalContext) -> Self {
        Self {
            subject: p.subject(),
            roles: p.roles(),
            token_roles: p.token_roles(),
        }
    }
}
