use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::AuthError;
use account_service::account::errors::EventPublisherError;
use account_service::account::ports::AccountEventPublisher;
use account_service::account::ports::CredentialRepository;
use account_service::domain::account::events::AccountRegisteredEvent;
use account_service::domain::account::models::CredentialRecord;
use account_service::domain::account::models::EmailAddress;
use account_service::domain::account::models::UserProfile;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::AppState;
use async_trait::async_trait;
use auth::PasswordHasher;
use auth::Role;
use auth::TokenIssuer;
use auth::TokenTtl;
use auth::TokenValidator;
use chrono::Utc;

/// Shared signing secret for every in-process issuer and validator.
pub const SECRET: &[u8] = b"test-secret-key-for-token-signing-32b";

/// In-memory credential store backing router-level tests; no database,
/// no sockets.
#[derive(Default)]
pub struct InMemoryCredentialRepository {
    records: Mutex<HashMap<String, (CredentialRecord, UserProfile)>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing the registration flow.
    pub fn seed(&self, record: CredentialRecord, profile: UserProfile) {
        self.records
            .lock()
            .unwrap()
            .insert(record.identifier.as_str().to_string(), (record, profile));
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_identifier(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, AuthError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(identifier.as_str())
            .map(|(record, _)| record.clone()))
    }

    async fn create(
        &self,
        record: CredentialRecord,
        profile: UserProfile,
    ) -> Result<CredentialRecord, AuthError> {
        let mut records = self.records.lock().unwrap();
        let key = record.identifier.as_str().to_string();
        if records.contains_key(&key) {
            return Err(AuthError::AlreadyRegistered);
        }
        records.insert(key, (record.clone(), profile));
        Ok(record)
    }

    async fn update(&self, record: CredentialRecord) -> Result<CredentialRecord, AuthError> {
        let mut records = self.records.lock().unwrap();
        match records.get_mut(record.identifier.as_str()) {
            Some(entry) => {
                entry.0 = record.clone();
                Ok(record)
            }
            None => Err(AuthError::UserNotFound),
        }
    }

    async fn find_profile(
        &self,
        identifier: &EmailAddress,
    ) -> Result<Option<UserProfile>, AuthError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(identifier.as_str())
            .map(|(_, profile)| profile.clone()))
    }
}

/// Event publisher that records nothing and always succeeds.
pub struct NoopEventPublisher;

#[async_trait]
impl AccountEventPublisher for NoopEventPublisher {
    async fn publish_account_registered(
        &self,
        _event: &AccountRegisteredEvent,
    ) -> Result<(), EventPublisherError> {
        Ok(())
    }
}

pub type TestState = AppState<InMemoryCredentialRepository, NoopEventPublisher>;

/// Build an [`AppState`] over the in-memory repository with the default
/// token lifetimes.
pub fn test_state(repository: Arc<InMemoryCredentialRepository>) -> TestState {
    test_state_with_ttl(repository, TokenTtl::default())
}

pub fn test_state_with_ttl(
    repository: Arc<InMemoryCredentialRepository>,
    ttl: TokenTtl,
) -> TestState {
    let token_issuer = Arc::new(TokenIssuer::new(SECRET, ttl));
    let account_service = Arc::new(AccountService::new(
        repository,
        Arc::new(NoopEventPublisher),
        PasswordHasher::new(),
        Arc::clone(&token_issuer),
    ));

    AppState {
        account_service,
        token_issuer,
        token_validator: Arc::new(TokenValidator::new(SECRET)),
    }
}

/// Build a seedable credential record with a real hash of `password`.
pub fn credential(identifier: &str, password: &str, role: Role, active: bool) -> CredentialRecord {
    let password_hash = PasswordHasher::new()
        .hash(password)
        .expect("Failed to hash test password");

    CredentialRecord {
        identifier: EmailAddress::new(identifier.to_string()).expect("Invalid test identifier"),
        password_hash,
        role,
        active,
        created_at: Utc::now(),
    }
}

pub fn profile(first_name: &str, last_name: &str) -> UserProfile {
    UserProfile {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: "other".to_string(),
        address: "1 Test Street".to_string(),
        created_at: Utc::now(),
    }
}
