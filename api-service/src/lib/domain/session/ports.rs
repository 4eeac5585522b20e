use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::user::models::User;

/// Port for session issuance and request authentication.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// Updates the user's last-login timestamp on a best-effort basis.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `AccountDeactivated` - Correct password, inactive account
    /// * `Internal` - Store or token signing failure
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a valid token for a fresh standard-length token.
    ///
    /// The presented token is not invalidated.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid, or subject unknown or inactive
    /// * `Internal` - Store or token signing failure
    async fn refresh(&self, token: &str) -> Result<IssuedToken, SessionError>;

    /// Resolve the active user a bearer token belongs to.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid, or subject unknown or inactive
    /// * `Internal` - Store failure
    async fn authenticate(&self, token: &str) -> Result<User, SessionError>;
}
