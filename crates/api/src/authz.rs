//! Downstream authorization gate.
//!
//! The interceptor only populates identity; routes that need a principal
//! are wrapped with [`require_authenticated`].

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::app::errors::json_error;
use crate::context::AuthContext;

/// Reject requests whose [`AuthContext`] is anonymous (or missing).
pub async fn require_authenticated(req: Request, next: Next) -> Response {
    let authenticated = req
        .extensions()
        .get::<AuthContext>()
        .is_some_and(AuthContext::is_authenticated);

    if !authenticated {
        return json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required");
    }
    next.run(req).await
}
