//! bcrypt password hashing, run on the blocking pool.

use crate::error::{AuthError, AuthResult};

/// Default bcrypt cost.
pub const BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("task join error: {e}")))?
}

/// `Ok(false)` on mismatch; `Err` only if the hash itself is unusable.
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        bcrypt::verify(password, &hash).map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(format!("task join error: {e}")))?
}
