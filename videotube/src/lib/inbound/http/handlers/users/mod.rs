pub mod change_password;
pub mod current_user;
pub mod get_user;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;

pub use change_password::change_password;
pub use current_user::current_user;
pub use get_user::get_user;
pub use login::login;
pub use logout::logout;
pub use refresh_token::refresh_token;
pub use register::register;

use serde::Serialize;

use crate::domain::user::models::UserSession;
use crate::inbound::http::handlers::UserData;

/// Returned by login and refresh. Tokens are also set as cookies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub user: UserData,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&UserSession> for SessionData {
    fn from(session: &UserSession) -> Self {
        Self {
            user: (&session.user).into(),
            access_token: session.tokens.access_token.clone(),
            refresh_token: session.tokens.refresh_token.clone(),
        }
    }
}
