use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Which half of a token pair a token belongs to.
///
/// Access tokens are short-lived and presented on every protected call;
/// refresh tokens are long-lived and presented only to mint a new pair.
/// A token presented in the wrong slot is rejected, never promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims embedded in every signed token.
///
/// Not persisted anywhere; the token string is the only carrier. The role
/// is a snapshot taken at issuance time - a role change does not reach an
/// outstanding access token until it expires and the pair is rotated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the credential record identifier (email)
    pub sub: String,

    /// Role held by the subject when the token was issued
    pub role: Role,

    /// Access or refresh
    pub kind: TokenKind,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl TokenClaims {
    /// Create claims expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `sub` - Subject identifier
    /// * `role` - Role snapshot to embed
    /// * `kind` - Access or refresh
    /// * `ttl` - Time until expiry
    pub fn new(sub: impl Into<String>, role: Role, kind: TokenKind, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: sub.into(),
            role,
            kind,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stamps_expiry_from_ttl() {
        let claims = TokenClaims::new(
            "user@example.com",
            Role::User,
            TokenKind::Access,
            Duration::minutes(5),
        );

        assert_eq!(claims.sub, "user@example.com");
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.kind, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let claims = TokenClaims::new("a@x.com", Role::Admin, TokenKind::Refresh, Duration::hours(24));
        let json = serde_json::to_string(&claims).unwrap();

        assert!(json.contains("\"kind\":\"refresh\""));
        assert!(json.contains("\"role\":\"admin\""));
    }
}
