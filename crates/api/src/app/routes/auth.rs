//! Sign-in and refresh endpoints.

use axum::{
    extract::Extension,
    http::{header::AUTHORIZATION, HeaderMap},
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};

use tokengate_auth::{SignInService, TokenService};

use crate::app::dto::SignInRequest;
use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/signin", post(signin))
        .route("/refresh", put(refresh))
}

/// POST /auth/signin - exchange username/password for a credential pair
pub async fn signin(
    Extension(service): Extension<SignInService>,
    body: Option<Json<SignInRequest>>,
) -> Response {
    let Some(Json(body)) = body else {
        return errors::invalid_client_request();
    };
    let Some((username, password)) = body.credentials() else {
        return errors::invalid_client_request();
    };

    match service.sign_in(username, password).await {
        Ok(pair) => Json(pair).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// PUT /auth/refresh - exchange `Authorization: Bearer <refresh token>` for a new pair
pub async fn refresh(Extension(tokens): Extension<TokenService>, headers: HeaderMap) -> Response {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty());
    let Some(header) = header else {
        return errors::invalid_client_request();
    };

    match tokens.refresh_credential_pair(header) {
        Ok(pair) => Json(pair).into_response(),
        Err(e) => {
            tracing::info!(error = %e, "refresh refused");
            errors::auth_error_to_response(e)
        }
    }
}
