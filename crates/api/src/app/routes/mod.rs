use axum::{routing::get, Router};

pub mod auth;
pub mod system;

/// Routes that require an authenticated principal.
pub fn protected_router() -> Router {
    Router::new().route("/whoami", get(system::whoami))
}

/// Routes reachable without a token.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/auth", auth::router())
}
