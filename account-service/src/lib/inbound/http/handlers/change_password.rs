use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::inbound::http::guard::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

pub async fn change_password<CR, EP>(
    State(state): State<AppState<CR, EP>>,
    Extension(principal): Extension<AuthenticatedAccount>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<ApiSuccess<ChangePasswordResponseData>, ApiError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    state
        .account_service
        .change_password(
            &principal.identifier,
            &body.current_password,
            &body.new_password,
        )
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                ChangePasswordResponseData {
                    message: "Password changed".to_string(),
                },
            )
        })
}

/// HTTP request body for a password change (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePasswordResponseData {
    pub message: String,
}
