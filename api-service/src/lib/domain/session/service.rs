use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;
use auth::SessionLength;
use chrono::Utc;
use tokio::sync::OnceCell;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Login, refresh and bearer-token authentication over a user store.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    /// Digest checked when the email is unknown, hashed on first use.
    placeholder_digest: OnceCell<String>,
}

const PLACEHOLDER_PASSWORD: &str = "placeholder-for-unknown-accounts";

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `repository` - User store used to resolve identity claims
    /// * `authenticator` - Password verification and token signing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
            placeholder_digest: OnceCell::new(),
        }
    }

    async fn placeholder_digest(&self) -> Result<&str, SessionError> {
        let digest = self
            .placeholder_digest
            .get_or_try_init(|| async {
                let authenticator = Arc::clone(&self.authenticator);
                match tokio::task::spawn_blocking(move || authenticator.hash_password(PLACEHOLDER_PASSWORD)).await {
                    Ok(hashed) => hashed.map_err(|e| SessionError::Internal(e.to_string())),
                    Err(e) => Err(SessionError::Internal(format!("Password hashing task failed: {}", e))),
                }
            })
            .await?;

        Ok(digest.as_str())
    }

    /// Same hashing work as a real mismatch, so response time does not
    /// reveal whether the email exists.
    async fn reject_unknown_email(&self, password: &str) -> SessionError {
        let verified = match self.placeholder_digest().await {
            Ok(digest) => {
                let digest = digest.to_string();
                self.verify_password(password, &digest).await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = verified {
            tracing::warn!(error = %e, "Placeholder verification failed");
        }

        tracing::info!("Login rejected: unknown email");
        SessionError::InvalidCredentials
    }

    async fn verify_password(&self, password: &str, digest: &str) -> Result<bool, SessionError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let digest = digest.to_string();

        tokio::task::spawn_blocking(move || authenticator.verify_password(&password, &digest))
            .await
            .map_err(|e| SessionError::Internal(format!("Password verification task failed: {}", e)))
    }

    /// Token → active user, collapsing every failure into `InvalidToken`.
    async fn resolve_token(&self, token: &str) -> Result<User, SessionError> {
        let email = self
            .authenticator
            .verify_token(token)
            .ok_or(SessionError::InvalidToken)?;

        match self.repository.find_by_email(&email).await? {
            Some(user) if user.is_active => Ok(user),
            Some(user) => {
                tracing::info!(user_id = %user.id, "Token presented for inactive user");
                Err(SessionError::InvalidToken)
            }
            None => {
                tracing::info!("Token subject no longer resolves to a user");
                Err(SessionError::InvalidToken)
            }
        }
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let Some(mut user) = self.repository.find_by_email(&command.email).await? else {
            return Err(self.reject_unknown_email(&command.password).await);
        };

        if !self
            .verify_password(&command.password, &user.password_hash)
            .await?
        {
            tracing::info!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(SessionError::InvalidCredentials);
        }

        if !user.is_active {
            tracing::info!(user_id = %user.id, "Login rejected: account deactivated");
            return Err(SessionError::AccountDeactivated);
        }

        let token = self
            .authenticator
            .issue_token(user.email.as_str(), command.session_length)?;

        let now = Utc::now();
        match self.repository.record_login(&user.id, now).await {
            Ok(()) => user.last_login = Some(now),
            Err(e) => tracing::warn!(
                user_id = %user.id,
                error = %e,
                "Failed to record last login"
            ),
        }

        tracing::info!(
            user_id = %user.id,
            extended = command.session_length == SessionLength::Extended,
            expires_at = %token.expires_at,
            "User logged in"
        );

        Ok(Session { token, user })
    }

    async fn refresh(&self, token: &str) -> Result<IssuedToken, SessionError> {
        let user = self.resolve_token(token).await?;

        let token = self
            .authenticator
            .issue_token(user.email.as_str(), SessionLength::Standard)?;
        tracing::debug!(user_id = %user.id, "Token refreshed");

        Ok(token)
    }

    async fn authenticate(&self, token: &str) -> Result<User, SessionError> {
        self.resolve_token(token).await
    }
}
