use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for event publishing operations
#[derive(Debug, Clone, Error)]
pub enum EventPublisherError {
    #[error("Failed to serialize event: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish event to broker: {0}")]
    PublishFailed(String),

    #[error("Connection to event broker failed: {0}")]
    ConnectionFailed(String),

    #[error("Event publishing timeout: {0}")]
    Timeout(String),
}

/// Top-level error for authentication and authorization outcomes.
///
/// Every variant is terminal and user-visible except the infrastructure
/// ones (`Repository`, `Hashing`, `Token`), which the HTTP layer collapses
/// into a generic internal error so no internals cross the security
/// boundary. Nothing here is retried.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No credential presented: log in to continue")]
    MissingCredential,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Session expired: log in again")]
    TokenExpired,

    #[error("Account is blocked")]
    Blocked,

    #[error("Insufficient role for this operation")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Incorrect password")]
    InvalidPassword,

    #[error("User already registered")]
    AlreadyRegistered,

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Infrastructure errors
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),

    #[error("Token error: {0}")]
    Token(String),
}
