//! Authentication primitives library
//!
//! Provides the reusable pieces of the authentication service:
//! - Password hashing and verification (bcrypt)
//! - Signed, time-bound bearer token issuance and validation (JWT)
//!
//! The service crate defines its own domain traits and adapts these
//! implementations. Nothing in here touches HTTP or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth_core::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth_core::TokenCodec;
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256);
//! let token = codec.issue("alice@example.com", Duration::minutes(30)).unwrap();
//! let subject = codec.validate(&token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
