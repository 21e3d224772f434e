//! Credential and token authentication library
//!
//! Provides the two cryptographic building blocks the blog service
//! authenticates with:
//! - Password hashing (Argon2id, salted, PHC string format)
//! - Signed bearer token issuance and validation (HMAC JWT with a fixed TTL)
//!
//! Both types are stateless and configured once at process startup; the
//! service layer decides what a verified credential means.
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
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::{Duration, Utc};
//! use jsonwebtoken::Algorithm;
//!
//! let codec = TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(30),
//! )
//! .unwrap();
//!
//! let token = codec.issue("42", Utc::now()).unwrap();
//! let subject = codec.validate(&token, Utc::now()).unwrap();
//! assert_eq!(subject, "42");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
