use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::HashingPool;
use chrono::Utc;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginIdentifier;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSession;
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
    hashing: HashingPool,
    decoy_hash: String,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Credential and session authority
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        let hashing = authenticator.hashing_pool();
        let decoy_hash = authenticator.decoy_hash().to_string();
        Self {
            repository,
            authenticator,
            hashing,
            decoy_hash,
        }
    }

    async fn find_by_identifier(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<Option<User>, UserError> {
        match identifier {
            LoginIdentifier::Username(username) => {
                self.repository.find_by_username(username).await
            }
            LoginIdentifier::Email(email) => self.repository.find_by_email(email).await,
        }
    }

    /// Issue a token pair and store its refresh token.
    ///
    /// With `superseding`, the write only happens if that token is still the
    /// stored one, so a refresh token is exchanged at most once.
    async fn start_session(
        &self,
        mut user: User,
        superseding: Option<&str>,
    ) -> Result<UserSession, UserError> {
        let tokens = self.authenticator.issue_token_pair(&user.identity())?;
        let refresh_token = tokens.refresh_token.clone();

        match superseding {
            Some(current) => {
                self.repository
                    .rotate_refresh_token(&user.id, current, refresh_token.clone())
                    .await?
            }
            None => {
                self.repository
                    .set_refresh_token(&user.id, Some(refresh_token.clone()))
                    .await?
            }
        }
        user.refresh_token = Some(refresh_token);

        Ok(UserSession { user, tokens })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self.hashing.hash(command.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            fullname: command.fullname,
            avatar: command.avatar,
            cover_image: command.cover_image,
            watch_history: Vec::new(),
            password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, username = %created_user.username, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError> {
        let Some(user) = self.find_by_identifier(&command.identifier).await? else {
            // Same Argon2 cost as a wrong password.
            self.hashing
                .verify(command.password, self.decoy_hash.clone())
                .await?;
            tracing::info!("Login rejected: unknown user");
            return Err(UserError::InvalidCredentials);
        };

        let matches = self
            .hashing
            .verify(command.password, user.password_hash.clone())
            .await?;
        if !matches {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let session = self.start_session(user, None).await?;
        tracing::info!(user_id = %session.user.id, "User logged in");

        Ok(session)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<UserSession, UserError> {
        let claims = self.authenticator.verify_refresh_token(refresh_token)?;
        let user_id = UserId::from_string(&claims.sub).map_err(|_| UserError::TokenInvalid)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(UserError::TokenInvalid)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            tracing::warn!(user_id = %user.id, "Refresh rejected: token is not the current one");
            return Err(UserError::RefreshTokenRevoked);
        }

        let session = self.start_session(user, Some(refresh_token)).await?;
        tracing::info!(user_id = %session.user.id, "Session refreshed");

        Ok(session)
    }

    async fn logout(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.set_refresh_token(id, None).await?;
        tracing::info!(user_id = %id, "User logged out");
        Ok(())
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        let matches = self
            .hashing
            .verify(command.old_password, user.password_hash.clone())
            .await?;
        if !matches {
            return Err(UserError::InvalidCredentials);
        }

        user.password_hash = self.hashing.hash(command.new_password).await?;
        user.refresh_token = None;
        user.updated_at = Utc::now();

        self.repository.update(user).await?;
        tracing::info!(user_id = %id, "Password changed");

        Ok(())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    fn verify_access_token(&self, token: &str) -> Result<auth::AccessClaims, UserError> {
        self.authenticator
            .verify_access_token(token)
            .map_err(UserError::from)
    }
}
