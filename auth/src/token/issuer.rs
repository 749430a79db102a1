use chrono::Duration;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::TokenClaims;
use super::claims::TokenKind;
use super::errors::TokenError;
use crate::role::Role;

/// Time-to-live configuration for the two token kinds.
///
/// The two values are independent: a short access TTL bounds the exposure
/// window of a stolen token and the role-snapshot staleness window, while
/// the long refresh TTL avoids forcing a re-login every few minutes.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl {
    pub access: Duration,
    pub refresh: Duration,
}

impl Default for TokenTtl {
    /// 5 minutes access, 24 hours refresh.
    fn default() -> Self {
        Self {
            access: Duration::minutes(5),
            refresh: Duration::hours(24),
        }
    }
}

/// A freshly minted access + refresh token pair.
///
/// Pairs are created wholesale at login and re-minted wholesale on every
/// refresh (rotation); the old pair is never individually revoked - tokens
/// are stateless, and revocation happens by blocking the credential record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Mints signed, time-limited tokens carrying [`TokenClaims`].
///
/// Uses HS256 (HMAC with SHA-256); the secret must be shared with the
/// [`TokenValidator`](super::TokenValidator) checking these tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    ttl: TokenTtl,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (at least 256 bits for HS256; keep it in
    ///   configuration or a vault, never in code)
    /// * `ttl` - Access and refresh lifetimes
    pub fn new(secret: &[u8], ttl: TokenTtl) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Issue a single signed token.
    ///
    /// The TTL is chosen by kind. The returned string is opaque to callers;
    /// claims only come back out through the validator.
    ///
    /// # Arguments
    /// * `sub` - Subject identifier
    /// * `role` - Role snapshot to embed
    /// * `kind` - Access or refresh
    ///
    /// # Errors
    /// * `IssueFailed` - Token encoding failed
    pub fn issue(&self, sub: &str, role: Role, kind: TokenKind) -> Result<String, TokenError> {
        let ttl = match kind {
            TokenKind::Access => self.ttl.access,
            TokenKind::Refresh => self.ttl.refresh,
        };

        let claims = TokenClaims::new(sub, role, kind, ttl);
        let header = Header::new(Algorithm::HS256);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    /// Issue a full access + refresh pair for a subject.
    ///
    /// Used at login and on every rotation.
    ///
    /// # Errors
    /// * `IssueFailed` - Token encoding failed
    pub fn issue_pair(&self, sub: &str, role: Role) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue(sub, role, TokenKind::Access)?,
            refresh: self.issue(sub, role, TokenKind::Refresh)?,
        })
    }

    /// The configured lifetimes.
    pub fn ttl(&self) -> TokenTtl {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::validator::TokenValidator;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_validate_claims_match() {
        let issuer = TokenIssuer::new(SECRET, TokenTtl::default());
        let validator = TokenValidator::new(SECRET);

        let token = issuer
            .issue("seller@example.com", Role::Seller, TokenKind::Access)
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = validator.validate(&token).expect("Failed to validate");
        assert_eq!(claims.sub, "seller@example.com");
        assert_eq!(claims.role, Role::Seller);
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_issue_pair_mints_both_kinds() {
        let issuer = TokenIssuer::new(SECRET, TokenTtl::default());
        let validator = TokenValidator::new(SECRET);

        let pair = issuer
            .issue_pair("user@example.com", Role::User)
            .expect("Failed to issue pair");
        assert_ne!(pair.access, pair.refresh);

        let access = validator.validate(&pair.access).unwrap();
        let refresh = validator.validate(&pair.refresh).unwrap();
        assert_eq!(access.kind, TokenKind::Access);
        assert_eq!(refresh.kind, TokenKind::Refresh);
        assert!(refresh.exp > access.exp);
    }
}
