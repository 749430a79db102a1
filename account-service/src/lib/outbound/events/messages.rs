use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::events::AccountRegisteredEvent;

/// Serializable envelope for all account-related events.
///
/// Infrastructure representation for event publishing (Kafka, etc.).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AccountEventMessage {
    AccountRegistered(AccountRegisteredMessage),
}

/// Serializable message for AccountRegistered domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRegisteredMessage {
    pub event_id: String,
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub registered_at: DateTime<Utc>,
}

impl From<&AccountRegisteredEvent> for AccountRegisteredMessage {
    fn from(event: &AccountRegisteredEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            identifier: event.identifier.clone(),
            first_name: event.first_name.clone(),
            last_name: event.last_name.clone(),
            registered_at: event.registered_at,
        }
    }
}

impl From<&AccountRegisteredEvent> for AccountEventMessage {
    fn from(event: &AccountRegisteredEvent) -> Self {
        AccountEventMessage::AccountRegistered(AccountRegisteredMessage::from(event))
    }
}
