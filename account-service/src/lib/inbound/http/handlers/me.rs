use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::domain::account::models::Account;
use crate::inbound::http::guard::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn me<CR, EP>(
    State(state): State<AppState<CR, EP>>,
    Extension(principal): Extension<AuthenticatedAccount>,
) -> Result<ApiSuccess<MeResponseData>, ApiError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    state
        .account_service
        .get_account(&principal.identifier)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub identifier: String,
    pub role: String,
    pub active: bool,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for MeResponseData {
    fn from(account: &Account) -> Self {
        Self {
            identifier: account.credential.identifier.as_str().to_string(),
            role: account.credential.role.to_string(),
            active: account.credential.active,
            first_name: account.profile.first_name.clone(),
            last_name: account.profile.last_name.clone(),
            gender: account.profile.gender.clone(),
            address: account.profile.address.clone(),
            created_at: account.credential.created_at,
        }
    }
}
