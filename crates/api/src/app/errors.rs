use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tokengate_auth::AuthError;

/// Map an auth failure to an HTTP response without leaking internals.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::MissingToken | AuthError::InvalidCredential => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credential",
            "expired or invalid token",
        ),
        AuthError::BadCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "bad_credentials",
            "invalid username or password",
        ),
        AuthError::InvalidSubject => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_subject",
            "subject must not be empty",
        ),
        AuthError::Codec(_)
        | AuthError::Lookup(_)
        | AuthError::Hashing(_)
        | AuthError::LifetimeOverflow => {
            tracing::error!(error = %err, "authentication backend failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "authentication temporarily unavailable",
            )
        }
    }
}

pub fn invalid_client_request() -> axum::response::Response {
    json_error(
        StatusCode::FORBIDDEN,
        "invalid_client_request",
        "invalid client request",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use tokengate_auth::LookupError;

    use super::*;

    #[test]
    fn validation_failures_are_unauthorized() {
        assert_eq!(auth_error_to_response(AuthError::InvalidCredential).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(auth_error_to_response(AuthError::MissingToken).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(auth_error_to_response(AuthError::BadCredentials).status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn backend_failures_are_server_errors() {
        let err = AuthError::Lookup(LookupError::Unavailable("db".to_string()));
        assert_eq!(auth_error_to_response(err).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            auth_error_to_response(AuthError::LifetimeOverflow).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
