use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// Administrative role assignment. The new role reaches outstanding access
/// tokens only on their next rotation; the staleness window is bounded by
/// the access TTL.
pub async fn set_role<CR, EP>(
    State(state): State<AppState<CR, EP>>,
    Path(identifier): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> Result<ApiSuccess<SetRoleResponseData>, ApiError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    let identifier = EmailAddress::new(identifier)?;

    state
        .account_service
        .set_role(&identifier, body.role)
        .await
        .map_err(ApiError::from)
        .map(|record| {
            ApiSuccess::new(
                StatusCode::OK,
                SetRoleResponseData {
                    identifier: record.identifier.as_str().to_string(),
                    role: record.role.to_string(),
                },
            )
        })
}

/// HTTP request body for a role assignment (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetRoleRequest {
    role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetRoleResponseData {
    pub identifier: String,
    pub role: String,
}
