pub mod argon2;
pub mod errors;
pub mod pool;

pub use argon2::PasswordHasher;
pub use errors::PasswordError;
pub use pool::HashingPool;
