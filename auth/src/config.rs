use serde::Deserialize;
use thiserror::Error;

/// Longest accepted token lifetime (one year).
pub const MAX_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// Signing configuration for one token class.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// HMAC secret used to sign and verify tokens of this class
    pub secret: String,
    /// Lifetime of an issued token in seconds
    pub ttl_seconds: i64,
}

/// Argon2id work factor and hashing concurrency.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    /// Memory cost in KiB
    #[serde(default = "PasswordConfig::default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes over memory
    #[serde(default = "PasswordConfig::default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    #[serde(default = "PasswordConfig::default_parallelism")]
    pub parallelism: u32,
    /// Upper bound on hash computations running at the same time
    #[serde(default = "PasswordConfig::default_max_concurrent_hashes")]
    pub max_concurrent_hashes: usize,
}

impl PasswordConfig {
    fn default_memory_kib() -> u32 {
        argon2::Params::DEFAULT_M_COST
    }

    fn default_iterations() -> u32 {
        argon2::Params::DEFAULT_T_COST
    }

    fn default_parallelism() -> u32 {
        argon2::Params::DEFAULT_P_COST
    }

    fn default_max_concurrent_hashes() -> usize {
        4
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Self::default_memory_kib(),
            iterations: Self::default_iterations(),
            parallelism: Self::default_parallelism(),
            max_concurrent_hashes: Self::default_max_concurrent_hashes(),
        }
    }
}

/// Complete configuration of the authenticator.
///
/// Passed in explicitly at construction time. Access and refresh tokens are
/// signed with separate secrets.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub access_token: TokenConfig,
    pub refresh_token: TokenConfig,
    #[serde(default)]
    pub password: PasswordConfig,
}

/// Rejected authentication configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthConfigError {
    #[error("{0} token secret must not be empty")]
    EmptySecret(&'static str),

    #[error("Access and refresh tokens must be signed with different secrets")]
    SharedSecret,

    #[error("{token} token ttl must be positive, got {ttl_seconds}s")]
    NonPositiveTtl {
        token: &'static str,
        ttl_seconds: i64,
    },

    #[error(
        "{token} token ttl of {ttl_seconds}s exceeds the maximum of {max}s",
        max = MAX_TTL_SECONDS
    )]
    TtlTooLong {
        token: &'static str,
        ttl_seconds: i64,
    },

    #[error("Refresh token ttl ({refresh}s) is shorter than access token ttl ({access}s)")]
    RefreshShorterThanAccess { access: i64, refresh: i64 },

    #[error("Invalid password hashing parameters: {0}")]
    InvalidHashParams(String),

    #[error("At least one concurrent password hash must be allowed")]
    NoHashingPermits,
}

impl AuthConfig {
    /// Check the configuration before building an authenticator from it.
    ///
    /// # Errors
    /// * `EmptySecret` - A signing secret is empty
    /// * `SharedSecret` - Both token classes use the same secret
    /// * `NonPositiveTtl` - A ttl is zero or negative
    /// * `TtlTooLong` - A ttl exceeds [`MAX_TTL_SECONDS`]
    /// * `RefreshShorterThanAccess` - Refresh tokens would lapse before access tokens
    /// * `InvalidHashParams` - Argon2 rejects the work factor
    /// * `NoHashingPermits` - `max_concurrent_hashes` is zero
    pub fn validate(&self) -> Result<(), AuthConfigError> {
        let classes = [
            ("access", &self.access_token),
            ("refresh", &self.refresh_token),
        ];

        for (name, token) in classes {
            if token.secret.is_empty() {
                return Err(AuthConfigError::EmptySecret(name));
            }
            if token.ttl_seconds <= 0 {
                return Err(AuthConfigError::NonPositiveTtl {
                    token: name,
                    ttl_seconds: token.ttl_seconds,
                });
            }
            if token.ttl_seconds > MAX_TTL_SECONDS {
                return Err(AuthConfigError::TtlTooLong {
                    token: name,
                    ttl_seconds: token.ttl_seconds,
                });
            }
        }

        if self.access_token.secret == self.refresh_token.secret {
            return Err(AuthConfigError::SharedSecret);
        }

        if self.refresh_token.ttl_seconds < self.access_token.ttl_seconds {
            return Err(AuthConfigError::RefreshShorterThanAccess {
                access: self.access_token.ttl_seconds,
                refresh: self.refresh_token.ttl_seconds,
            });
        }

        argon2::Params::new(
            self.password.memory_kib,
            self.password.iterations,
            self.password.parallelism,
            None,
        )
        .map_err(|e| AuthConfigError::InvalidHashParams(e.to_string()))?;

        if self.password.max_concurrent_hashes == 0 {
            return Err(AuthConfigError::NoHashingPermits);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            access_token: TokenConfig {
                secret: "access-secret".to_string(),
                ttl_seconds: 900,
            },
            refresh_token: TokenConfig {
                secret: "refresh-secret".to_string(),
                ttl_seconds: 864_000,
            },
            password: PasswordConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(valid_config().validate(), Ok(()));
    }

    #[test]
    fn test_shared_secret_rejected() {
        let mut config = valid_config();
        config.refresh_token.secret = config.access_token.secret.clone();

        assert_eq!(config.validate(), Err(AuthConfigError::SharedSecret));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let mut config = valid_config();
        config.refresh_token.secret = String::new();

        assert_eq!(
            config.validate(),
            Err(AuthConfigError::EmptySecret("refresh"))
        );
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let mut config = valid_config();
        config.access_token.ttl_seconds = 0;

        assert_eq!(
            config.validate(),
            Err(AuthConfigError::NonPositiveTtl {
                token: "access",
                ttl_seconds: 0
            })
        );
    }

    #[test]
    fn test_unbounded_ttl_rejected() {
        let mut config = valid_config();
        config.refresh_token.ttl_seconds = i64::MAX;

        assert_eq!(
            config.validate(),
            Err(AuthConfigError::TtlTooLong {
                token: "refresh",
                ttl_seconds: i64::MAX
            })
        );
    }

    #[test]
    fn test_refresh_shorter_than_access_rejected() {
        let mut config = valid_config();
        config.refresh_token.ttl_seconds = 60;

        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::RefreshShorterThanAccess { .. })
        ));
    }

    #[test]
    fn test_invalid_hash_params_rejected() {
        let mut config = valid_config();
        config.password.parallelism = 0;

        assert!(matches!(
            config.validate(),
            Err(AuthConfigError::InvalidHashParams(_))
        ));
    }

    #[test]
    fn test_zero_hashing_permits_rejected() {
        let mut config = valid_config();
        config.password.max_concurrent_hashes = 0;

        assert_eq!(config.validate(), Err(AuthConfigError::NoHashingPermits));
    }

    #[test]
    fn test_deserialize_with_default_password_section() {
        let config: AuthConfig = serde_json::from_value(serde_json::json!({
            "access_token": { "secret": "a", "ttl_seconds": 60 },
            "refresh_token": { "secret": "b", "ttl_seconds": 120 }
        }))
        .unwrap();

        assert_eq!(config.password.memory_kib, argon2::Params::DEFAULT_M_COST);
        assert_eq!(config.password.max_concurrent_hashes, 4);
    }
}
