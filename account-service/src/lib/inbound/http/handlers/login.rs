use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;
use crate::inbound::http::transport;

pub async fn login<CR, EP>(
    State(state): State<AppState<CR, EP>>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    let identifier = EmailAddress::new(body.email_address)?;

    let (record, pair) = state
        .account_service
        .login(&identifier, &body.password)
        .await?;

    let data = LoginResponseData {
        identifier: record.identifier.as_str().to_string(),
        role: record.role.to_string(),
        access_token: pair.access.clone(),
        refresh_token: pair.refresh.clone(),
    };

    // Token pair travels in the body and as headers/cookies; clients pick
    // their transport.
    let mut response = ApiSuccess::new(StatusCode::OK, data).into_response();
    transport::attach_pair(&mut response, &pair, state.token_issuer.ttl());

    Ok(response)
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email_address: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub identifier: String,
    pub role: String,
    pub access_token: String,
    pub refresh_token: String,
}
