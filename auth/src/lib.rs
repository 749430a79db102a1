//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for the backoffice services:
//! - Password hashing (Argon2id, cost-tunable)
//! - Signed, time-limited access/refresh token pairs
//! - Token validation with a closed failure taxonomy
//! - The closed role set shared by tokens and credential records
//!
//! The service defines its own domain traits and adapts these implementations.
//! Nothing in this crate performs I/O; issuance and validation are pure
//! computation over the server secret and the clock.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("wrong_password", &hash));
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Role, TokenIssuer, TokenKind, TokenTtl, TokenValidator};
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let issuer = TokenIssuer::new(secret, TokenTtl::default());
//! let pair = issuer.issue_pair("admin@example.com", Role::Admin).unwrap();
//!
//! let validator = TokenValidator::new(secret);
//! let claims = validator.validate(&pair.access).unwrap();
//! assert_eq!(claims.sub, "admin@example.com");
//! assert_eq!(claims.role, Role::Admin);
//! assert_eq!(claims.kind, TokenKind::Access);
//! ```

pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleError;
pub use token::TokenClaims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenKind;
pub use token::TokenPair;
pub use token::TokenTtl;
pub use token::TokenValidator;
