pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::user;
pub use domain::video;
pub use outbound::repositories;
