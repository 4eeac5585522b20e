//! Authentication utilities library
//!
//! Provides the credential and session primitives used by the API service:
//! - Password hashing (bcrypt or Argon2id, 72-byte input limit)
//! - Signed, time-bound JWT access tokens
//! - Authentication coordination
//!
//! Nothing here touches storage. Callers look users up and hand the stored
//! digest in.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new().with_bcrypt_cost(4).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Algorithm, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap();
//! let issued = tokens.issue("alice@example.com", Duration::minutes(30)).unwrap();
//! assert_eq!(tokens.verify(&issued.access_token).as_deref(), Some("alice@example.com"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Algorithm, Authenticator, PasswordHasher, SessionLength, TokenService};
//!
//! let auth = Authenticator::new(
//!     PasswordHasher::new().with_bcrypt_cost(4).unwrap(),
//!     TokenService::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256).unwrap(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! assert!(auth.verify_password("password123", &hash));
//! let issued = auth
//!     .issue_token("alice@example.com", SessionLength::Standard)
//!     .unwrap();
//!
//! // Authenticated request: verify token
//! let subject = auth.verify_token(&issued.access_token);
//! assert_eq!(subject.as_deref(), Some("alice@example.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jsonwebtoken::Algorithm;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashScheme;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::IssuedToken;
pub use token::SessionLength;
pub use token::TokenService;
