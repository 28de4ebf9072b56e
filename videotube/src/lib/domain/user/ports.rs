use async_trait::async_trait;

use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserSession;
use crate::domain::video::models::VideoId;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// The password is hashed before the record is persisted.
    ///
    /// # Errors
    /// * `InvalidPassword` - Password is empty
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and start a session.
    ///
    /// Stores the new refresh token, superseding any earlier one.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `Crypto` - Stored hash is corrupt or token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<UserSession, UserError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// The presented token must be the one currently stored for the user; it
    /// is replaced by the newly issued refresh token.
    ///
    /// # Errors
    /// * `TokenExpired` - Refresh token lapsed
    /// * `TokenInvalid` - Refresh token failed verification
    /// * `RefreshTokenRevoked` - Token is not the user's current refresh token
    /// * `DatabaseError` - Database operation failed
    async fn refresh_session(&self, refresh_token: &str) -> Result<UserSession, UserError>;

    /// End the user's session by clearing the stored refresh token.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn logout(&self, id: &UserId) -> Result<(), UserError>;

    /// Replace the user's password after checking the current one.
    ///
    /// Clears the stored refresh token, so other sessions cannot be refreshed.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidCredentials` - Old password is wrong
    /// * `InvalidPassword` - New password is empty
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lapsed
    /// * `TokenInvalid` - Token failed verification
    fn verify_access_token(&self, token: &str) -> Result<auth::AccessClaims, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Set or clear the stored refresh token.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), UserError>;

    /// Replace the stored refresh token, but only if it still equals `current`.
    ///
    /// The comparison and the write happen as one step, so two callers
    /// presenting the same token cannot both rotate it.
    ///
    /// # Errors
    /// * `RefreshTokenRevoked` - User is gone or the stored token is no longer `current`
    /// * `DatabaseError` - Database operation failed
    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        current: &str,
        next: String,
    ) -> Result<(), UserError>;

    /// Append a video to the user's watch history.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `VideoNotFound` - Video does not exist
    /// * `DatabaseError` - Database operation failed
    async fn push_watch_history(&self, id: &UserId, video_id: &VideoId) -> Result<(), UserError>;
}
