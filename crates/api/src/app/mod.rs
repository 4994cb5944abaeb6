//! HTTP application wiring (Axum router + auth layers).
//!
//! - `routes/`: HTTP handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use tokengate_auth::{AuthConfig, Clock, ConfigError, SignInService, SystemClock, TokenService, UserLookup};

use crate::{authz, middleware};

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AuthConfig, users: Arc<dyn UserLookup>) -> Result<Router, ConfigError> {
    build_app_with_clock(config, users, Arc::new(SystemClock))
}

pub fn build_app_with_clock(
    config: &AuthConfig,
    users: Arc<dyn UserLookup>,
    clock: Arc<dyn Clock>,
) -> Result<Router, ConfigError> {
    let tokens = TokenService::with_clock(config, clock)?;
    let signin = SignInService::new(tokens.clone(), users.clone());
    let auth_state = middleware::AuthState {
        tokens: tokens.clone(),
        users,
    };

    // Protected routes: the gate runs after the interceptor has populated identity.
    let protected = routes::protected_router()
        .route_layer(axum::middleware::from_fn(authz::require_authenticated));

    Ok(Router::new()
        .merge(routes::public_router())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(tokens))
                .layer(Extension(signin))
                .layer(axum::middleware::from_fn_with_state(
                    auth_state,
                    middleware::auth_middleware,
                )),
        ))
}
