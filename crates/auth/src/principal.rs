use crate::claims::Claims;
use crate::error::LookupError;
use crate::user::UserLookup;
use crate::Role;

/// Authenticated identity produced by a successful verification.
///
/// Rebuilt for every request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,

    /// Roles freshly resolved from the user store; authoritative.
    pub roles: Vec<Role>,

    /// Roles embedded in the token at issuance; informational only.
    pub token_roles: Vec<Role>,
}

/// Turn verified claims into a principal using current user data.
///
/// `Ok(None)` when the subject no longer exists or is disabled.
pub async fn resolve_principal(
    claims: Claims,
    users: &dyn UserLookup,
) -> Result<Option<Principal>, LookupError> {
    let Some(user) = users.find_by_subject(&claims.sub).await? else {
        return Ok(None);
    };
    if !user.enabled {
        return Ok(None);
    }
    Ok(Some(Principal {
        subject: claims.sub,
        roles: user.roles,
        token_roles: claims.roles,
    }))
}
