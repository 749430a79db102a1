use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register<CR, EP>(
    State(state): State<AppState<CR, EP>>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email_address: String,
    password: String,
    first_name: String,
    last_name: String,
    gender: String,
    address: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, EmailError> {
        let identifier = EmailAddress::new(self.email_address)?;
        Ok(RegisterCommand::new(
            identifier,
            self.password,
            self.first_name,
            self.last_name,
            self.gender,
            self.address,
        ))
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub identifier: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for RegisterResponseData {
    fn from(account: &Account) -> Self {
        Self {
            identifier: account.credential.identifier.as_str().to_string(),
            role: account.credential.role.to_string(),
            first_name: account.profile.first_name.clone(),
            last_name: account.profile.last_name.clone(),
            created_at: account.credential.created_at,
        }
    }
}
