use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;

/// Decodes and verifies tokens minted by [`TokenIssuer`](super::TokenIssuer).
///
/// The signature is always checked against the server secret; there is no
/// unverified decode path in this crate. Expiry is checked with zero grace
/// period.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a new token validator.
    ///
    /// # Arguments
    /// * `secret` - The secret the issuer signs with
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // jsonwebtoken defaults to 60s of leeway; expiry here is exact
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Decode a token and verify its signature and expiry.
    ///
    /// # Arguments
    /// * `token` - Token string as read from the request
    ///
    /// # Returns
    /// The embedded claims
    ///
    /// # Errors
    /// * `Missing` - Token string is empty or blank
    /// * `Expired` - Signature is valid but the token is past its expiry
    /// * `SignatureInvalid` - Signature does not match the server secret
    /// * `Malformed` - Anything else: not a JWT, bad base64/JSON, unknown
    ///   role or kind tag, wrong algorithm, missing claim
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
                _ => TokenError::Malformed,
            })
    }
}
