use std::sync::Arc;

use anyhow::Context;
use tokengate_auth::{password, AuthConfig, InMemoryUserDirectory, Role, UserRecord};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tokengate_observability::init();

    let config = AuthConfig::from_env().context("invalid auth configuration")?;
    tracing::info!(?config, refresh_lifetime = %config.refresh_token_lifetime(), "auth configured");

    let users = Arc::new(InMemoryUserDirectory::new());
    seed_bootstrap_user(&users).await?;

    let app = tokengate_api::app::build_app(&config, users)?;

    let bind = std::env::var("TOKENGATE_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Register `TOKENGATE_BOOTSTRAP_USER` / `_PASSWORD` / `_ROLES` if set.
async fn seed_bootstrap_user(users: &InMemoryUserDirectory) -> anyhow::Result<()> {
    let (Ok(username), Ok(plain)) = (
        std::env::var("TOKENGATE_BOOTSTRAP_USER"),
        std::env::var("TOKENGATE_BOOTSTRAP_PASSWORD"),
    ) else {
        tracing::warn!("no bootstrap user configured; sign-in will refuse every request");
        return Ok(());
    };

    let roles: Vec<Role> = std::env::var("TOKENGATE_BOOTSTRAP_ROLES")
        .unwrap_or_else(|_| "ADMIN".to_string())
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(Role::from)
        .collect();

    let hash = password::hash_password(&plain, None).await?;
    tracing::info!(%username, roles = roles.len(), "seeded bootstrap user");
    users.insert(UserRecord::new(username, hash, roles));
    Ok(())
}
