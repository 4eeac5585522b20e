use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Default access token lifetime.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Lifetime of an extended ("remember me") session.
pub const EXTENDED_TOKEN_TTL_DAYS: i64 = 30;

/// Requested session length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionLength {
    Standard,
    Extended,
}

impl SessionLength {
    pub fn from_remember_me(remember_me: bool) -> Self {
        if remember_me {
            SessionLength::Extended
        } else {
            SessionLength::Standard
        }
    }
}

/// A freshly minted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed, time-bound bearer tokens.
///
/// Holds the signing secret and expiry policy. Stateless otherwise: nothing
/// is recorded about issued tokens, so a token stays valid until it expires.
pub struct TokenService {
    handler: JwtHandler,
    default_ttl: Duration,
    extended_ttl: Duration,
}

impl TokenService {
    /// Create a token service with the default expiry policy.
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    /// * `UnsupportedAlgorithm` - Algorithm is not an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        Ok(Self {
            handler: JwtHandler::new(secret, algorithm)?,
            default_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
            extended_ttl: Duration::days(EXTENDED_TOKEN_TTL_DAYS),
        })
    }

    /// Set the lifetime of standard sessions.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the lifetime of extended sessions.
    pub fn with_extended_ttl(mut self, ttl: Duration) -> Self {
        self.extended_ttl = ttl;
        self
    }

    pub fn ttl(&self, length: SessionLength) -> Duration {
        match length {
            SessionLength::Standard => self.default_ttl,
            SessionLength::Extended => self.extended_ttl,
        }
    }

    /// Mint a token for `subject` expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, JwtError> {
        let now = Utc::now();
        let claims = Claims::for_subject(subject, now, ttl);
        let access_token = self.handler.encode(&claims)?;

        Ok(IssuedToken {
            access_token,
            expires_at: now + ttl,
        })
    }

    /// Mint a token whose lifetime follows the session policy.
    pub fn issue_for_session(
        &self,
        subject: &str,
        length: SessionLength,
    ) -> Result<IssuedToken, JwtError> {
        self.issue(subject, self.ttl(length))
    }

    /// Verify a bearer token and extract its subject claim.
    ///
    /// Every failure (bad signature, malformed, expired, wrong algorithm,
    /// empty subject) collapses to `None`.
    pub fn verify(&self, token: &str) -> Option<String> {
        let claims: Claims = self.handler.decode(token).ok()?;

        if claims.is_expired(Utc::now().timestamp()) || claims.sub.is_empty() {
            return None;
        }

        Some(claims.sub)
    }
}
