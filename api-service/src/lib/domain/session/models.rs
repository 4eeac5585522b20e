use std::fmt;

use auth::IssuedToken;
use auth::SessionLength;

use crate::domain::user::models::User;

/// Token type marker returned alongside every access token.
pub const TOKEN_TYPE: &str = "bearer";

/// Login request with raw, unvalidated credentials.
///
/// The email is not parsed into an `EmailAddress`: a malformed claim must
/// fail the same way an unknown one does.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
    pub session_length: SessionLength,
}

impl LoginCommand {
    pub fn new(email: String, password: String, remember_me: bool) -> Self {
        Self {
            email,
            password,
            session_length: SessionLength::from_remember_me(remember_me),
        }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"***")
            .field("session_length", &self.session_length)
            .finish()
    }
}

/// Successful login: the minted token and the authenticated user.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: IssuedToken,
    pub user: User,
}
