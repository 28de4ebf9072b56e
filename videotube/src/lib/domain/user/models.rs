use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::video::models::VideoId;
use crate::user::errors::AssetUrlError;
use crate::user::errors::EmailError;
use crate::user::errors::FullNameError;
use crate::user::errors::UserIdError;
use crate::user::errors::UsernameError;

/// User aggregate entity.
///
/// Represents a registered channel owner / viewer.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub fullname: FullName,
    pub avatar: AssetUrl,
    pub cover_image: Option<AssetUrl>,
    pub watch_history: Vec<VideoId>,
    pub password_hash: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity snapshot embedded in access tokens.
    pub fn identity(&self) -> auth::Identity {
        auth::Identity {
            id: self.id.to_string(),
            email: self.email.as_str().to_string(),
            username: self.username.as_str().to_string(),
            fullname: self.fullname.as_str().to_string(),
        }
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Trimmed and lowercased, then checked to be 3-32 characters of ASCII
/// alphanumerics, underscore and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains characters other than [a-z0-9_-]
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = username.trim().to_lowercase();
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trimmed, lowercased and validated with an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Display name of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MAX_LENGTH: usize = 100;

    /// Create a trimmed, non-empty full name.
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `TooLong` - Longer than 100 characters
    pub fn new(fullname: String) -> Result<Self, FullNameError> {
        let fullname = fullname.trim().to_string();
        let length = fullname.chars().count();

        if length == 0 {
            return Err(FullNameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(FullNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(fullname))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Location of a media asset (avatar, cover image, video file, thumbnail)
/// hosted by an external media store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrl(String);

impl AssetUrl {
    /// Create an asset URL.
    ///
    /// # Errors
    /// * `Empty` - Nothing left after trimming
    /// * `InvalidScheme` - Not an absolute http or https URL
    pub fn new(url: String) -> Result<Self, AssetUrlError> {
        let url = url.trim().to_string();

        if url.is_empty() {
            return Err(AssetUrlError::Empty);
        }

        let has_host = ["https://", "http://"]
            .iter()
            .any(|scheme| url.len() > scheme.len() && url.starts_with(scheme));
        if !has_host {
            return Err(AssetUrlError::InvalidScheme(url));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub fullname: FullName,
    pub avatar: AssetUrl,
    pub cover_image: Option<AssetUrl>,
    /// Plain text password (hashed by the service before persisting)
    pub password: String,
}

/// Login by username or email address.
#[derive(Debug)]
pub enum LoginIdentifier {
    Username(Username),
    Email(EmailAddress),
}

impl LoginIdentifier {
    /// Interpret raw input as an email when it contains `@`, otherwise as a
    /// username.
    pub fn parse(raw: String) -> Option<Self> {
        if raw.contains('@') {
            EmailAddress::new(raw).ok().map(Self::Email)
        } else {
            Username::new(raw).ok().map(Self::Username)
        }
    }
}

/// Command to log a user in.
#[derive(Debug)]
pub struct LoginCommand {
    pub identifier: LoginIdentifier,
    pub password: String,
}

/// Command to replace a user's password.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub old_password: String,
    pub new_password: String,
}

/// User together with a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user: User,
    pub tokens: auth::TokenPair,
}
