use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app::dto::WhoAmIResponse;
use crate::app::errors;
use crate::context::AuthContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(auth): Extension<AuthContext>) -> Response {
    match auth.principal() {
        Some(principal) => Json(WhoAmIResponse::from(principal)).into_response(),
        None => errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required"),
    }
}
