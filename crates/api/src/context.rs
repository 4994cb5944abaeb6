use tokengate_auth::{Principal, Role};

/// Authenticated identity attached to a request by the interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    subject: String,
    roles: Vec<Role>,
    token_roles: Vec<Role>,
}

impl PrincipalContext {
    pub fn new(subject: impl Into<String>, roles: Vec<Role>, token_roles: Vec<Role>) -> Self {
        Self {
            subject: subject.into(),
            roles,
            token_roles,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Current roles from the user store; use these for authorization.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Roles snapshotted into the token at issuance. Advisory only.
    pub fn token_roles(&self) -> &[Role] {
        &self.token_roles
    }
}

impl From<Principal> for PrincipalContext {
    fn from(value: Principal) -> Self {
        Self::new(value.subject, value.roles, value.token_roles)
    }
}

/// Per-request authentication state.
///
/// Always present on requests that passed through the interceptor. It is
/// request-local and dropped with the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthContext {
    #[default]
    Anonymous,
    Authenticated(PrincipalContext),
}

impl AuthContext {
    pub fn principal(&self) -> Option<&PrincipalContext> {
        match self {
            AuthContext::Anonymous => None,
            AuthContext::Authenticated(p) => Some(p),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal().is_some()
    }
}
