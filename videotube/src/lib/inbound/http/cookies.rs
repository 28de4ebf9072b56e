use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Attributes shared by both session cookies.
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub secure: bool,
}

impl CookieSettings {
    fn build(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Add both session cookies to the jar.
    pub fn set_session(&self, jar: CookieJar, tokens: &auth::TokenPair) -> CookieJar {
        jar.add(self.build(ACCESS_TOKEN_COOKIE, tokens.access_token.clone()))
            .add(self.build(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone()))
    }

    /// Expire both session cookies.
    pub fn clear_session(&self, jar: CookieJar) -> CookieJar {
        jar.remove(self.build(ACCESS_TOKEN_COOKIE, String::new()))
            .remove(self.build(REFRESH_TOKEN_COOKIE, String::new()))
    }

    /// Expire the refresh token cookie only.
    pub fn clear_refresh(&self, jar: CookieJar) -> CookieJar {
        jar.remove(self.build(REFRESH_TOKEN_COOKIE, String::new()))
    }
}
