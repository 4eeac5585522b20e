use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Page;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Hashes new and changed passwords
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Hash on the blocking pool; the hash is deliberately slow.
    async fn hash_password(&self, password: &Password) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.expose().to_string();

        let digest = tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(format!("Task join error: {}", e)))?
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(digest)
    }

    async fn set_active(&self, id: &UserId, is_active: bool) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        user.is_active = is_active;
        user.updated_at = Some(Utc::now());

        let user = self.repository.update(user).await?;
        tracing::info!(user_id = %user.id, is_active, "User activation changed");

        Ok(user)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(&command.password).await?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            username: command.username,
            full_name: command.full_name,
            password_hash,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
            last_login: None,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User created"
        );

        Ok(created_user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    async fn list_users(&self, page: Page) -> Result<Vec<User>, UserError> {
        self.repository.list(page).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_full_name) = command.full_name {
            user.full_name = Some(new_full_name);
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(&new_password).await?;
        }

        user.updated_at = Some(Utc::now());

        self.repository.update(user).await
    }

    async fn deactivate_user(&self, id: &UserId) -> Result<User, UserError> {
        self.set_active(id, false).await
    }

    async fn activate_user(&self, id: &UserId) -> Result<User, UserError> {
        self.set_active(id, true).await
    }
}
