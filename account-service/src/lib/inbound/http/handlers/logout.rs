use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::transport;

/// Clears both token cookies. Stateless tokens cannot be revoked
/// server-side, so logout is purely a client-side credential drop;
/// real revocation is blocking the account.
pub async fn logout() -> Response {
    let mut response = ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out".to_string(),
        },
    )
    .into_response();

    transport::clear_tokens(&mut response);

    response
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
