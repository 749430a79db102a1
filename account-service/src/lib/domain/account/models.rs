use std::fmt;
use std::str::FromStr;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::EmailError;

/// Credential record - one per authenticable principal.
///
/// The identifier is unique and immutable after creation. `active == false`
/// means the account is blocked and fails every authorization check no
/// matter what tokens are presented; since tokens are stateless, flipping
/// this flag is the only server-side revocation mechanism.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub identifier: EmailAddress,
    pub password_hash: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Profile data linked 1:1 to a credential record.
///
/// Created atomically with the credential during registration.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Credential record plus its linked profile.
#[derive(Debug, Clone)]
pub struct Account {
    pub credential: CredentialRecord,
    pub profile: UserProfile,
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub identifier: EmailAddress,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub address: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `identifier` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `first_name`, `last_name`, `gender`, `address` - Profile fields
    pub fn new(
        identifier: EmailAddress,
        password: String,
        first_name: String,
        last_name: String,
        gender: String,
        address: String,
    ) -> Self {
        Self {
            identifier,
            password,
            first_name,
            last_name,
            gender,
            address,
        }
    }
}
