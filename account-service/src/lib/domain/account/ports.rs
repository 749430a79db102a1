use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::errors::EventPublisherError;
use crate::domain::account::events::AccountRegisteredEvent;
use crate::domain::account::models::CredentialRecord;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::UserProfile;

/// Persistence operations for credential records and their profiles.
///
/// The only shared mutable resource in the core; reads run concurrently,
/// writes are atomic per record (single-row update or one transaction for
/// create) with no cross-record coordination.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve a credential record by its unique identifier.
    ///
    /// # Arguments
    /// * `identifier` - Email address the record was created with
    ///
    /// # Returns
    /// Optional credential record (None if not found)
    ///
    /// # Errors
    /// * `Repository` - Storage operation failed
    async fn find_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, AuthError>;

    /// Persist a new credential record and its linked profile atomically.
    ///
    /// # Arguments
    /// * `record` - Credential record to create
    /// * `profile` - Profile created alongside it
    ///
    /// # Returns
    /// Created credential record
    ///
    /// # Errors
    /// * `AlreadyRegistered` - A record with this identifier already exists
    /// * `Repository` - Storage operation failed
    async fn create(
        &self,
        record: CredentialRecord,
        profile: UserProfile,
    ) -> Result<CredentialRecord, AuthError>;

    /// Persist a mutated credential record.
    ///
    /// The identifier is the immutable key; only password hash, role, and
    /// active flag change.
    ///
    /// # Returns
    /// Updated credential record
    ///
    /// # Errors
    /// * `UserNotFound` - No record with this identifier
    /// * `Repository` - Storage operation failed
    async fn update(&self, record: CredentialRecord) -> Result<CredentialRecord, AuthError>;

    /// Retrieve the profile linked to a credential record.
    ///
    /// # Returns
    /// Optional profile (None if not found)
    ///
    /// # Errors
    /// * `Repository` - Storage operation failed
    async fn find_profile(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<UserProfile>, AuthError>;
}

/// Event publishing for account domain events.
#[async_trait]
pub trait AccountEventPublisher: Send + Sync + 'static {
    /// Publish account registration event.
    ///
    /// Best-effort: the caller logs and swallows failures so registration
    /// never blocks on the broker.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    /// * `ConnectionFailed` - Broker connection failed
    /// * `Timeout` - Publishing timed out
    async fn publish_account_registered(
        &self,
        event: &AccountRegisteredEvent,
    ) -> Result<(), EventPublisherError>;
}
