//! Credential and session authority
//!
//! Provides the authentication primitives the videotube service builds on:
//! - Password hashing (Argon2id) with a configurable work factor
//! - Bounded, off-executor hashing for async callers
//! - Access and refresh JWT issuance and verification, each class with its
//!   own secret and lifetime
//! - An injectable clock so expiry can be tested without sleeping
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{AuthConfig, Authenticator, Identity, PasswordConfig, TokenConfig};
//!
//! let config = AuthConfig {
//!     access_token: TokenConfig {
//!         secret: "access_secret_key_at_least_32_bytes!".to_string(),
//!         ttl_seconds: 15 * 60,
//!     },
//!     refresh_token: TokenConfig {
//!         secret: "refresh_secret_key_at_least_32_bytes".to_string(),
//!         ttl_seconds: 10 * 24 * 60 * 60,
//!     },
//!     password: PasswordConfig::default(),
//! };
//! let auth = Authenticator::new(&config).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let identity = Identity {
//!     id: "u1".to_string(),
//!     email: "alice@example.com".to_string(),
//!     username: "alice".to_string(),
//!     fullname: "Alice Liddell".to_string(),
//! };
//! let tokens = auth.authenticate("password123", &hash, &identity).unwrap();
//!
//! // Validate tokens
//! let claims = auth.verify_access_token(&tokens.access_token).unwrap();
//! assert_eq!(claims.username, "alice");
//! let refresh = auth.verify_refresh_token(&tokens.refresh_token).unwrap();
//! assert_eq!(refresh.sub, "u1");
//! ```

pub mod authenticator;
pub mod clock;
pub mod config;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::AuthenticatorBuildError;
pub use authenticator::TokenPair;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use config::AuthConfig;
pub use config::AuthConfigError;
pub use config::PasswordConfig;
pub use config::TokenConfig;
pub use jwt::AccessClaims;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::RefreshClaims;
pub use jwt::TokenClaims;
pub use password::HashingPool;
pub use password::PasswordError;
pub use password::PasswordHasher;
