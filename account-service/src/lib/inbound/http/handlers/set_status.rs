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

/// Administrative block/unblock. Blocking takes effect on the next guarded
/// call regardless of outstanding tokens; it is the only server-side
/// revocation mechanism.
pub async fn set_status<CR, EP>(
    State(state): State<AppState<CR, EP>>,
    Path(identifier): Path<String>,
    Json(body): Json<SetStatusRequest>,
) -> Result<ApiSuccess<SetStatusResponseData>, ApiError>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    let identifier = EmailAddress::new(identifier)?;

    state
        .account_service
        .set_status(&identifier, body.active)
        .await
        .map_err(ApiError::from)
        .map(|record| {
            ApiSuccess::new(
                StatusCode::OK,
                SetStatusResponseData {
                    identifier: record.identifier.as_str().to_string(),
                    active: record.active,
                },
            )
        })
}

/// HTTP request body for a status change (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetStatusRequest {
    active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetStatusResponseData {
    pub identifier: String,
    pub active: bool,
}
