use std::sync::Arc;

use auth::PasswordHasher;
use auth::Role;
use auth::TokenIssuer;
use auth::TokenPair;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::account::ports::AccountEventPublisher;
use crate::account::ports::CredentialRepository;
use crate::domain::account::events::AccountRegisteredEvent;
use crate::domain::account::models::Account;
use crate::domain::account::models::CredentialRecord;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::UserProfile;

/// Domain service for registration, login, and credential administration.
///
/// Orchestrates the credential repository, the password hasher, and the
/// token issuer behind the registration/login flows and the guard's
/// record checks.
pub struct AccountService<CR, EP>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    repository: Arc<CR>,
    event_publisher: Arc<EP>,
    password_hasher: PasswordHasher,
    token_issuer: Arc<TokenIssuer>,
}

impl<CR, EP> AccountService<CR, EP>
where
    CR: CredentialRepository,
    EP: AccountEventPublisher,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential persistence implementation
    /// * `event_publisher` - Domain event publishing implementation
    /// * `password_hasher` - Hasher tuned per configuration
    /// * `token_issuer` - Issuer shared with the session guard
    pub fn new(
        repository: Arc<CR>,
        event_publisher: Arc<EP>,
        password_hasher: PasswordHasher,
        token_issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            password_hasher,
            token_issuer,
        }
    }

    /// Register a new account.
    ///
    /// Creates the credential record (role `user`, active) and its profile
    /// atomically. No token is issued; the caller must log in afterwards.
    /// The AccountRegistered event is best-effort and never fails the
    /// registration.
    ///
    /// # Errors
    /// * `InvalidInput` - A required field is empty
    /// * `AlreadyRegistered` - Identifier already has a record
    /// * `Hashing` / `Repository` - Infrastructure failure
    pub async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError> {
        for (field, value) in [
            ("password", &command.password),
            ("first_name", &command.first_name),
            ("last_name", &command.last_name),
            ("gender", &command.gender),
            ("address", &command.address),
        ] {
            if value.trim().is_empty() {
                return Err(AuthError::InvalidInput(format!("{} must not be empty", field)));
            }
        }

        if self
            .repository
            .find_by_identifier(&command.identifier)
            .await?
            .is_some()
        {
            return Err(AuthError::AlreadyRegistered);
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        let now = Utc::now();
        let record = CredentialRecord {
            identifier: command.identifier,
            password_hash,
            role: Role::User,
            active: true,
            created_at: now,
        };
        let profile = UserProfile {
            first_name: command.first_name,
            last_name: command.last_name,
            gender: command.gender,
            address: command.address,
            created_at: now,
        };

        let created = self.repository.create(record, profile.clone()).await?;

        let event = AccountRegisteredEvent::new(&created, &profile);
        if let Err(e) = self.event_publisher.publish_account_registered(&event).await {
            tracing::error!(
                "Failed to publish AccountRegistered event for {}: {}",
                created.identifier,
                e
            );
        }

        Ok(Account {
            credential: created,
            profile,
        })
    }

    /// Exchange a password for a token pair.
    ///
    /// The blocked check runs before password verification, so a blocked
    /// account never learns whether the password was correct.
    ///
    /// # Errors
    /// * `UserNotFound` - No record for this identifier
    /// * `Blocked` - Account is blocked
    /// * `InvalidPassword` - Password does not match
    /// * `Repository` / `Token` - Infrastructure failure
    pub async fn login(
        &self,
        identifier: &EmailAddress,
        password: &str,
    ) -> Result<(CredentialRecord, TokenPair), AuthError> {
        let record = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !record.active {
            return Err(AuthError::Blocked);
        }

        if !self.password_hasher.verify(password, &record.password_hash) {
            return Err(AuthError::InvalidPassword);
        }

        let pair = self
            .token_issuer
            .issue_pair(record.identifier.as_str(), record.role)
            .map_err(|e| AuthError::Token(e.to_string()))?;

        Ok((record, pair))
    }

    /// Load the credential record behind a token subject, enforcing the
    /// blocked flag. Role membership stays with the guard, which checks the
    /// claims snapshot.
    ///
    /// # Errors
    /// * `UserNotFound` - Subject has no record
    /// * `Blocked` - Account is blocked
    pub async fn authorize(&self, subject: &str) -> Result<CredentialRecord, AuthError> {
        let record = self.credential(subject).await?;

        if !record.active {
            return Err(AuthError::Blocked);
        }

        Ok(record)
    }

    /// Load the credential record behind a token subject without the
    /// blocked check. The refresh path uses this: rotation happens first,
    /// then active and role are re-checked.
    ///
    /// # Errors
    /// * `UserNotFound` - Subject has no record
    pub async fn credential(&self, subject: &str) -> Result<CredentialRecord, AuthError> {
        let identifier =
            EmailAddress::new(subject.to_string()).map_err(|_| AuthError::UserNotFound)?;

        self.repository
            .find_by_identifier(&identifier)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Change the subject's password after re-verifying the current one.
    ///
    /// # Errors
    /// * `InvalidInput` - New password is empty
    /// * `UserNotFound` - Subject has no record
    /// * `InvalidPassword` - Current password does not match
    pub async fn change_password(
        &self,
        subject: &str,
        current: &str,
        new: &str,
    ) -> Result<(), AuthError> {
        if new.trim().is_empty() {
            return Err(AuthError::InvalidInput("password must not be empty".to_string()));
        }

        let mut record = self.credential(subject).await?;

        if !self.password_hasher.verify(current, &record.password_hash) {
            return Err(AuthError::InvalidPassword);
        }

        record.password_hash = self
            .password_hasher
            .hash(new)
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        self.repository.update(record).await?;

        Ok(())
    }

    /// Administrative action: assign a new role.
    ///
    /// Outstanding access tokens keep the old role snapshot until they
    /// expire; the change takes effect on the next rotation or login.
    ///
    /// # Errors
    /// * `UserNotFound` - No record for this identifier
    pub async fn set_role(
        &self,
        identifier: &EmailAddress,
        role: Role,
    ) -> Result<CredentialRecord, AuthError> {
        let mut record = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        record.role = role;
        self.repository.update(record).await
    }

    /// Administrative action: block or unblock an account.
    ///
    /// Blocking is the only revocation mechanism; every guarded call
    /// re-checks the flag, so it takes effect immediately even against
    /// unexpired tokens.
    ///
    /// # Errors
    /// * `UserNotFound` - No record for this identifier
    pub async fn set_status(
        &self,
        identifier: &EmailAddress,
        active: bool,
    ) -> Result<CredentialRecord, AuthError> {
        let mut record = self
            .repository
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        record.active = active;
        self.repository.update(record).await
    }

    /// Load the credential and profile for a subject.
    ///
    /// # Errors
    /// * `UserNotFound` - Subject has no record
    /// * `Repository` - Profile row missing (registration is atomic, so
    ///   this indicates storage corruption)
    pub async fn get_account(&self, subject: &str) -> Result<Account, AuthError> {
        let credential = self.credential(subject).await?;

        let profile = self
            .repository
            .find_profile(&credential.identifier)
            .await?
            .ok_or_else(|| {
                AuthError::Repository(format!("profile missing for {}", credential.identifier))
            })?;

        Ok(Account {
            credential,
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenTtl;
    use auth::TokenValidator;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::errors::EventPublisherError;

    // Define mocks in the test module using mockall
    mock! {
        pub TestCredentialRepository {}

        #[async_trait]
        impl CredentialRepository for TestCredentialRepository {
            async fn find_by_identifier(&self, identifier: &EmailAddress) -> Result<Option<CredentialRecord>, AuthError>;
            async fn create(&self, record: CredentialRecord, profile: UserProfile) -> Result<CredentialRecord, AuthError>;
            async fn update(&self, record: CredentialRecord) -> Result<CredentialRecord, AuthError>;
            async fn find_profile(&self, identifier: &EmailAddress) -> Result<Option<UserProfile>, AuthError>;
        }
    }

    mock! {
        pub TestEventPublisher {}

        #[async_trait]
        impl AccountEventPublisher for TestEventPublisher {
            async fn publish_account_registered(&self, event: &AccountRegisteredEvent) -> Result<(), EventPublisherError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn service(
        repository: MockTestCredentialRepository,
        event_publisher: MockTestEventPublisher,
    ) -> AccountService<MockTestCredentialRepository, MockTestEventPublisher> {
        AccountService::new(
            Arc::new(repository),
            Arc::new(event_publisher),
            PasswordHasher::new(),
            Arc::new(TokenIssuer::new(SECRET, TokenTtl::default())),
        )
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).unwrap()
    }

    fn register_command(identifier: &str) -> RegisterCommand {
        RegisterCommand::new(
            email(identifier),
            "secret123".to_string(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "female".to_string(),
            "12 Analytical Row".to_string(),
        )
    }

    fn record_with_password(identifier: &str, password: &str, active: bool) -> CredentialRecord {
        CredentialRecord {
            identifier: email(identifier),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            role: Role::User,
            active,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestCredentialRepository::new();
        let mut event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|record, profile| {
                record.identifier.as_str() == "a@x.com"
                    && record.role == Role::User
                    && record.active
                    && record.password_hash.starts_with("$argon2")
                    && profile.first_name == "Ada"
            })
            .times(1)
            .returning(|record, _| Ok(record));

        event_publisher
            .expect_publish_account_registered()
            .times(1)
            .returning(|_| Ok(()));

        let service = service(repository, event_publisher);

        let account = service.register(register_command("a@x.com")).await.unwrap();
        assert_eq!(account.credential.identifier.as_str(), "a@x.com");
        assert_eq!(account.credential.role, Role::User);
        assert!(account.credential.active);
        // Plaintext never stored
        assert_ne!(account.credential.password_hash, "secret123");
    }

    #[tokio::test]
    async fn test_register_duplicate_identifier() {
        let mut repository = MockTestCredentialRepository::new();
        let mut event_publisher = MockTestEventPublisher::new();

        let existing = record_with_password("a@x.com", "other", true);
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);
        event_publisher.expect_publish_account_registered().times(0);

        let service = service(repository, event_publisher);

        let result = service.register(register_command("a@x.com")).await;
        assert!(matches!(result.unwrap_err(), AuthError::AlreadyRegistered));
    }

    #[tokio::test]
    async fn test_register_empty_field_rejected() {
        let repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let service = service(repository, event_publisher);

        let mut command = register_command("a@x.com");
        command.first_name = "  ".to_string();

        let result = service.register(command).await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_register_event_failure_does_not_fail_registration() {
        let mut repository = MockTestCredentialRepository::new();
        let mut event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|record, _| Ok(record));

        event_publisher
            .expect_publish_account_registered()
            .times(1)
            .returning(|_| Err(EventPublisherError::PublishFailed("broker down".to_string())));

        let service = service(repository, event_publisher);

        let result = service.register(register_command("a@x.com")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_success_returns_valid_pair() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let record = record_with_password("a@x.com", "secret123", true);
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(repository, event_publisher);

        let (record, pair) = service.login(&email("a@x.com"), "secret123").await.unwrap();
        assert_eq!(record.identifier.as_str(), "a@x.com");
        assert!(!pair.access.is_empty());
        assert!(!pair.refresh.is_empty());

        let validator = TokenValidator::new(SECRET);
        let claims = validator.validate(&pair.access).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, Role::User);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, event_publisher);

        let result = service.login(&email("nobody@x.com"), "whatever").await;
        assert!(matches!(result.unwrap_err(), AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn test_login_blocked_before_password_check() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        // The stored hash is garbage: if the password were verified first,
        // this would surface as InvalidPassword instead of Blocked.
        let record = CredentialRecord {
            identifier: email("a@x.com"),
            password_hash: "not-a-real-hash".to_string(),
            role: Role::User,
            active: false,
            created_at: Utc::now(),
        };
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(repository, event_publisher);

        let result = service.login(&email("a@x.com"), "secret123").await;
        assert!(matches!(result.unwrap_err(), AuthError::Blocked));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let record = record_with_password("a@x.com", "secret123", true);
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(repository, event_publisher);

        let result = service.login(&email("a@x.com"), "wrong").await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_authorize_blocked_account() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let record = record_with_password("a@x.com", "secret123", false);
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));

        let service = service(repository, event_publisher);

        let result = service.authorize("a@x.com").await;
        assert!(matches!(result.unwrap_err(), AuthError::Blocked));
    }

    #[tokio::test]
    async fn test_change_password_verifies_current() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let record = record_with_password("a@x.com", "secret123", true);
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository.expect_update().times(0);

        let service = service(repository, event_publisher);

        let result = service
            .change_password("a@x.com", "wrong-current", "new-password")
            .await;
        assert!(matches!(result.unwrap_err(), AuthError::InvalidPassword));
    }

    #[tokio::test]
    async fn test_change_password_success_rehashes() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let record = record_with_password("a@x.com", "secret123", true);
        let old_hash = record.password_hash.clone();
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository
            .expect_update()
            .withf(move |record| {
                record.password_hash != old_hash && record.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|record| Ok(record));

        let service = service(repository, event_publisher);

        let result = service
            .change_password("a@x.com", "secret123", "new-password")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_set_role_updates_record() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let record = record_with_password("a@x.com", "secret123", true);
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository
            .expect_update()
            .withf(|record| record.role == Role::Seller)
            .times(1)
            .returning(|record| Ok(record));

        let service = service(repository, event_publisher);

        let updated = service.set_role(&email("a@x.com"), Role::Seller).await.unwrap();
        assert_eq!(updated.role, Role::Seller);
    }

    #[tokio::test]
    async fn test_set_status_blocks_account() {
        let mut repository = MockTestCredentialRepository::new();
        let event_publisher = MockTestEventPublisher::new();

        let record = record_with_password("a@x.com", "secret123", true);
        repository
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(record.clone())));
        repository
            .expect_update()
            .withf(|record| !record.active)
            .times(1)
            .returning(|record| Ok(record));

        let service = service(repository, event_publisher);

        let updated = service.set_status(&email("a@x.com"), false).await.unwrap();
        assert!(!updated.active);
    }
}
