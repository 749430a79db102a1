use thiserror::Error;

/// Error type for token operations.
///
/// Validation failures form a closed taxonomy; every caller of the
/// validator must decide what each variant means for the request at hand
/// (only `Expired` access tokens may enter the refresh flow).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is missing")]
    Missing,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to issue token: {0}")]
    IssueFailed(String),
}
