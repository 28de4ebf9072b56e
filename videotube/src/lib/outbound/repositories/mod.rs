pub mod user;
pub mod video;

pub use user::PostgresUserRepository;
pub use video::PostgresVideoRepository;
