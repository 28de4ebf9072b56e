pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::AccessClaims;
pub use claims::Identity;
pub use claims::RefreshClaims;
pub use claims::TokenClaims;
pub use errors::JwtError;
pub use handler::JwtHandler;
