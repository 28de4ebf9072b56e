use std::sync::Arc;

use uuid::Uuid;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::AuthConfig;
use crate::config::AuthConfigError;
use crate::jwt::AccessClaims;
use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::RefreshClaims;
use crate::password::HashingPool;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

const DECOY_PASSWORD: &str = "decoy-password-never-stored";

/// Credential and session authority.
///
/// Verifies passwords against stored hashes and issues/verifies the two token
/// classes. Access and refresh tokens each have their own handler, and so
/// their own secret and lifetime. Stateless apart from configuration; share it
/// behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access_tokens: JwtHandler,
    refresh_tokens: JwtHandler,
    max_concurrent_hashes: usize,
    decoy_hash: String,
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),
}

/// Failure to build an authenticator from configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticatorBuildError {
    #[error("Invalid auth configuration: {0}")]
    Config(#[from] AuthConfigError),

    #[error("Password hasher setup failed: {0}")]
    Password(#[from] PasswordError),
}

impl Authenticator {
    /// Create an authenticator using the wall clock.
    ///
    /// # Errors
    /// * `Config` - Configuration failed validation
    /// * `Password` - Argon2 parameters were rejected
    pub fn new(config: &AuthConfig) -> Result<Self, AuthenticatorBuildError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an authenticator with an explicit time source.
    ///
    /// # Errors
    /// * `Config` - Configuration failed validation
    /// * `Password` - Argon2 parameters were rejected
    pub fn with_clock(
        config: &AuthConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthenticatorBuildError> {
        config.validate()?;

        let password_hasher = PasswordHasher::from_config(&config.password)?;
        let decoy_hash = password_hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            password_hasher,
            access_tokens: JwtHandler::new(
                config.access_token.secret.as_bytes(),
                config.access_token.ttl_seconds,
                Arc::clone(&clock),
            ),
            refresh_tokens: JwtHandler::new(
                config.refresh_token.secret.as_bytes(),
                config.refresh_token.ttl_seconds,
                clock,
            ),
            max_concurrent_hashes: config.password.max_concurrent_hashes,
            decoy_hash,
        })
    }

    /// Hash a password for storage.
    ///
    /// Must be called before persisting any new or changed password.
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// `false` on mismatch
    ///
    /// # Errors
    /// * `CryptoFailure` - Stored hash is malformed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Hash with the configured work factor that matches no real password.
    ///
    /// Verifying against it costs as much as a real check, for paths where no
    /// stored hash exists.
    pub fn decoy_hash(&self) -> &str {
        &self.decoy_hash
    }

    /// Pool running this authenticator's hasher on the blocking thread pool.
    pub fn hashing_pool(&self) -> HashingPool {
        HashingPool::new(self.password_hasher.clone(), self.max_concurrent_hashes)
    }

    /// Issue a signed access token carrying an identity snapshot.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_access_token(&self, identity: &Identity) -> Result<String, JwtError> {
        let claims = AccessClaims::new(
            identity,
            self.access_tokens.now(),
            self.access_tokens.ttl_seconds(),
        );
        let token = self.access_tokens.encode(&claims)?;

        tracing::debug!(subject = %claims.sub, expires_at = claims.exp, "Issued access token");
        Ok(token)
    }

    /// Issue a signed refresh token carrying only the identifier.
    ///
    /// Every call gets a fresh random token id, so a new refresh token never
    /// equals an earlier one. The caller persists the token against the
    /// identity so it can later be rotated or revoked.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_refresh_token(&self, identifier: &str) -> Result<String, JwtError> {
        let claims = RefreshClaims::new(
            identifier,
            Uuid::new_v4(),
            self.refresh_tokens.now(),
            self.refresh_tokens.ttl_seconds(),
        );
        let token = self.refresh_tokens.encode(&claims)?;

        tracing::debug!(subject = %claims.sub, expires_at = claims.exp, "Issued refresh token");
        Ok(token)
    }

    /// Issue a fresh access/refresh token pair for an identity.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token_pair(&self, identity: &Identity) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(identity)?,
            refresh_token: self.issue_refresh_token(&identity.id)?,
        })
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `TokenInvalid` - Signature or structure check failed
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.access_tokens.verify(token)
    }

    /// Verify a refresh token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `TokenInvalid` - Signature or structure check failed
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.refresh_tokens.verify(token)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Identity to embed in the access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Stored hash is malformed
    /// * `Jwt` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token_pair(identity)?)
    }
}
