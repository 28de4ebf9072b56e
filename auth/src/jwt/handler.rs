use std::sync::Arc;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Serialize;

use super::claims::TokenClaims;
use super::errors::JwtError;
use crate::clock::Clock;

/// JWT token handler for one token class.
///
/// Holds the signing secret, the token lifetime and the clock used for both
/// issuance and expiry checks. Uses HS256 (HMAC with SHA-256).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_seconds: i64,
    clock: Arc<dyn Clock>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    /// * `ttl_seconds` - Lifetime of issued tokens
    /// * `clock` - Time source for `iat`/`exp` and expiry checks
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Use a different secret for every token class
    pub fn new(secret: &[u8], ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl_seconds,
            clock,
        }
    }

    /// Lifetime of tokens issued by this handler, in seconds.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Current time of the handler's clock (Unix timestamp).
    pub fn now(&self) -> i64 {
        self.clock.timestamp()
    }

    /// Encode claims into a signed JWT token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and decode its claims.
    ///
    /// The `exp` claim is mandatory. Expiry is checked against the handler's
    /// clock without leeway.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `TokenInvalid` - Signature, algorithm, structure or `exp` is invalid
    pub fn verify<T: TokenClaims>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::TokenInvalid(e.to_string()),
            })?;

        let claims = token_data.claims;
        if claims.is_expired(self.clock.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims)
    }
}
