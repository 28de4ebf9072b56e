use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

/// Claims payload that always carries an expiry.
pub trait TokenClaims: Serialize + DeserializeOwned {
    /// Expiration time (Unix timestamp).
    fn expires_at(&self) -> i64;

    /// Check if the token is expired.
    ///
    /// A token is still valid during the second it expires in.
    fn is_expired(&self, current_timestamp: i64) -> bool {
        self.expires_at() < current_timestamp
    }
}

/// Identity fields snapshotted into an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub username: String,
    pub fullname: String,
}

/// Payload of an access token.
///
/// A snapshot of the identity at issuance time; later changes to the user
/// record are not reflected until a new token is issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (user identifier)
    pub sub: String,
    pub email: String,
    pub username: String,
    pub fullname: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build access claims for an identity.
    ///
    /// # Arguments
    /// * `identity` - Identity snapshot to embed
    /// * `issued_at` - Issuance instant (Unix timestamp)
    /// * `ttl_seconds` - Seconds until the token expires
    pub fn new(identity: &Identity, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: identity.id.clone(),
            email: identity.email.clone(),
            username: identity.username.clone(),
            fullname: identity.fullname.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_seconds),
        }
    }

    /// Identity carried by the token.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.sub.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            fullname: self.fullname.clone(),
        }
    }
}

impl TokenClaims for AccessClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}

/// Payload of a refresh token.
///
/// Carries only the subject and a token id, so a leaked refresh token exposes
/// nothing beyond the user identifier. The id makes every issued token
/// distinct, including two issued within the same second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// Subject (user identifier)
    pub sub: String,
    /// Token id
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(
        subject: impl ToString,
        token_id: impl ToString,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            sub: subject.to_string(),
            jti: token_id.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_seconds),
        }
    }
}

impl TokenClaims for RefreshClaims {
    fn expires_at(&self) -> i64 {
        self.exp
    }
}
