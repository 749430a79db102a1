use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::CredentialRecord;
use crate::domain::account::models::UserProfile;

/// Domain event published when a new account is registered.
///
/// Downstream consumers use it for best-effort side effects (welcome
/// email); publishing failures never fail the registration itself.
#[derive(Debug, Clone)]
pub struct AccountRegisteredEvent {
    pub event_id: String,
    pub identifier: String,
    pub first_name: String,
    pub last_name: String,
    pub registered_at: DateTime<Utc>,
}

impl AccountRegisteredEvent {
    /// Create a new AccountRegistered event from the persisted pair.
    ///
    /// Generates a unique event ID and snapshots the data consumers need.
    ///
    /// # Arguments
    /// * `credential` - Credential record that was created
    /// * `profile` - Profile created alongside it
    pub fn new(credential: &CredentialRecord, profile: &UserProfile) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            identifier: credential.identifier.as_str().to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            registered_at: credential.created_at,
        }
    }
}
