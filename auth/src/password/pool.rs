use std::sync::Arc;

use tokio::sync::Semaphore;

use super::argon2::PasswordHasher;
use super::errors::PasswordError;

/// Runs password hashing off the async executor with bounded concurrency.
///
/// Each computation waits for a semaphore permit and then runs on the blocking
/// thread pool. At most `max_concurrent` Argon2 memory blocks are live at once.
#[derive(Clone)]
pub struct HashingPool {
    hasher: Arc<PasswordHasher>,
    permits: Arc<Semaphore>,
}

impl HashingPool {
    /// Create a pool allowing at most `max_concurrent` computations at once.
    ///
    /// A value of zero is treated as one.
    pub fn new(hasher: PasswordHasher, max_concurrent: usize) -> Self {
        Self {
            hasher: Arc::new(hasher),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Hash a password on the blocking pool.
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `HashingFailed` - Password hashing operation failed
    /// * `WorkerFailed` - The blocking task panicked or the pool was closed
    pub async fn hash(&self, password: String) -> Result<String, PasswordError> {
        let hasher = Arc::clone(&self.hasher);
        self.run(move || hasher.hash(&password)).await
    }

    /// Verify a password against a stored hash on the blocking pool.
    ///
    /// # Errors
    /// * `CryptoFailure` - Stored hash is malformed
    /// * `WorkerFailed` - The blocking task panicked or the pool was closed
    pub async fn verify(&self, password: String, hash: String) -> Result<bool, PasswordError> {
        let hasher = Arc::clone(&self.hasher);
        self.run(move || hasher.verify(&password, &hash)).await
    }

    /// Number of computations that could start right now.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    async fn run<T, F>(&self, work: F) -> Result<T, PasswordError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
    {
        let _permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| PasswordError::WorkerFailed(e.to_string()))?;

        tokio::task::spawn_blocking(work)
            .await
            .map_err(|e| PasswordError::WorkerFailed(e.to_string()))?
    }
}
