use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::IssuedToken;
use crate::token::SessionLength;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds no mutable state; safe to share behind an `Arc` across requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `password_hasher` - Credential hashing configuration
    /// * `token_service` - Token signing configuration and expiry policy
    pub fn new(password_hasher: PasswordHasher, token_service: TokenService) -> Self {
        Self {
            password_hasher,
            token_service,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored digest.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a token for `subject`.
    ///
    /// Callers verify the password (login) or an existing token (refresh) first.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(
        &self,
        subject: &str,
        length: SessionLength,
    ) -> Result<IssuedToken, JwtError> {
        self.token_service.issue_for_session(subject, length)
    }

    /// Verify a bearer token, returning its subject claim when valid.
    pub fn verify_token(&self, token: &str) -> Option<String> {
        self.token_service.verify(token)
    }
}
