pub mod claims;
pub mod errors;
pub mod issuer;
pub mod validator;

pub use claims::TokenClaims;
pub use claims::TokenKind;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use issuer::TokenPair;
pub use issuer::TokenTtl;
pub use validator::TokenValidator;
