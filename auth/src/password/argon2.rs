use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use crate::config::PasswordConfig;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id) with a
/// configurable work factor.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher with the library's default work factor.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `config` - Argon2 memory cost, iterations and parallelism
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 rejects the parameters
    pub fn from_config(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(format!("Invalid parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Every call draws a fresh random salt, so hashing the same password
    /// twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The work factor recorded in the stored hash is used, so hashes created
    /// under an older configuration keep verifying.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `CryptoFailure` - Stored hash is malformed or unsupported
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::CryptoFailure(e.to_string()))?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::CryptoFailure(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::from_config(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            max_concurrent_hashes: 1,
        })
        .expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        // Hash the password
        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        // Verify correct password
        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        // Verify incorrect password
        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("same_input").unwrap();
        let second = hasher.hash("same_input").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same_input", &first).unwrap());
        assert!(hasher.verify("same_input", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = fast_hasher();
        let hash = hasher.hash("plaintext-marker").unwrap();

        assert!(!hash.contains("plaintext-marker"));
    }

    #[test]
    fn test_empty_password_rejected() {
        let hasher = fast_hasher();
        assert_eq!(hasher.hash(""), Err(PasswordError::EmptyPassword));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::CryptoFailure(_))));
    }

    #[test]
    fn test_verify_uses_parameters_from_stored_hash() {
        let hash = fast_hasher().hash("password").unwrap();

        let stronger = PasswordHasher::from_config(&PasswordConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
            max_concurrent_hashes: 1,
        })
        .unwrap();

        assert!(stronger.verify("password", &hash).unwrap());
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let result = PasswordHasher::from_config(&PasswordConfig {
            memory_kib: 1024,
            iterations: 0,
            parallelism: 1,
            max_concurrent_hashes: 1,
        });
        assert!(matches!(result, Err(PasswordError::HashingFailed(_))));
    }
}
