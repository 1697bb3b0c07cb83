//! Authentication primitives library
//!
//! Provides the token lifecycle building blocks used by the auth service:
//! - Password hashing (HMAC-SHA512 keyed by a random salt) and password policy
//! - JWT access token issuance, parsing and validation
//! - Random refresh token generation
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("Abcdef12").unwrap();
//! let is_valid = hasher.verify("Abcdef12", &digest.hash, &digest.salt).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use std::collections::HashMap;
//!
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec
//!     .issue(1, "alice@example.com", &HashMap::new(), Duration::minutes(15))
//!     .unwrap();
//! let claims = codec.validate(&token, false).unwrap();
//! assert_eq!(claims.user_id(), Some(1));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let digest = auth.hash_password("Abcdef12").unwrap();
//!
//! // Login: verify and issue a token pair
//! let result = auth.authenticate("Abcdef12", &digest, 1, "alice@example.com").unwrap();
//!
//! // Refresh: accept the access token even once expired, then re-issue it
//! auth.validate_token(&result.access_token, true).unwrap();
//! let access_token = auth.refresh_access_token(&result.access_token).unwrap();
//! assert!(!access_token.is_empty());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordDigest;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordPolicy;
pub use refresh::RefreshToken;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenIssuer;
