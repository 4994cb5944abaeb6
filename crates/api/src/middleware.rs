//! Request interceptor: turns a bearer token into an [`AuthContext`].
//!
//! Never rejects. Requests without a usable token continue as
//! [`AuthContext::Anonymous`]; the decision to refuse belongs to
//! [`crate::authz`].

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use tokengate_auth::{resolve_principal, strip_bearer, TokenService, TokenStatus, UserLookup};

use crate::context::AuthContext;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenService,
    pub users: Arc<dyn UserLookup>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let context = authenticate_request(&state, req.headers()).await;
    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Resolve the authentication state for a set of request headers.
pub async fn authenticate_request(state: &AuthState, headers: &HeaderMap) -> AuthContext {
    let Some(token) = extract_bearer(headers) else {
        return AuthContext::Anonymous;
    };

    let claims = match state.tokens.verifier().inspect(token) {
        TokenStatus::Valid(claims) => claims,
        status => {
            tracing::debug!(status = status.kind(), "bearer token rejected");
            return AuthContext::Anonymous;
        }
    };

    let subject = claims.sub.clone();
    match resolve_principal(claims, state.users.as_ref()).await {
        Ok(Some(principal)) => AuthContext::Authenticated(principal.into()),
        Ok(None) => {
            tracing::info!(%subject, "token subject unknown or disabled");
            AuthContext::Anonymous
        }
        Err(e) => {
            tracing::warn!(%subject, error = %e, "user lookup failed; continuing unauthenticated");
            AuthContext::Anonymous
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = strip_bearer(header)?;
    (!token.is_empty()).then_some(token)
}
