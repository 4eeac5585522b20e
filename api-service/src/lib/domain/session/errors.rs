use thiserror::Error;

use crate::user::errors::UserError;

/// Login, refresh and request-authentication failures.
///
/// The first three are user-facing rejections; `Internal` means the system is
/// broken (store unreachable, signing misconfigured) and is reported apart.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Unknown identity or wrong password. The two cases are never told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Correct password for an inactive account.
    #[error("Account is deactivated")]
    AccountDeactivated,

    /// Any token verification failure, including unknown or inactive subject.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for SessionError {
    fn from(err: UserError) -> Self {
        SessionError::Internal(err.to_string())
    }
}

impl From<auth::JwtError> for SessionError {
    fn from(err: auth::JwtError) -> Self {
        SessionError::Internal(format!("Token generation failed: {}", err))
    }
}
