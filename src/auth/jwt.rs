//! Access token codec.
//!
//! Access tokens are stateless HS256 JWTs: any token with a valid signature
//! and live timestamps is accepted. There is deliberately no server-side
//! revocation list, so a leaked access token stays usable until its natural
//! expiry even after the parent refresh token has been revoked. The short
//! TTL (one hour by default) is the only mitigation.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthError;

const ISSUER: &str = "chirpy";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
}

/// Signs and validates access tokens with a single symmetric secret, fixed
/// at construction.
#[derive(Clone)]
pub struct TokenCodec {
    enc_key: EncodingKey,
    dec_key: DecodingKey,
}

impl TokenCodec {
    pub fn new(signing_key: &str) -> Self {
        Self {
            enc_key: EncodingKey::from_secret(signing_key.as_bytes()),
            dec_key: DecodingKey::from_secret(signing_key.as_bytes()),
        }
    }

    /// Issue a token for `subject`, valid from now until now + `ttl`.
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::default(), &claims, &self.enc_key).map_err(|_| AuthError::Hashing)
    }

    /// Verify a token and return its subject.
    ///
    /// Only HS256 is accepted; a token whose header declares any other
    /// algorithm fails signature validation rather than being verified with
    /// the algorithm it asks for. Timestamps are checked with zero leeway.
    pub fn validate(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;
        validation.set_issuer(&[ISSUER]);

        let data = decode::<Claims>(token, &self.dec_key, &validation).map_err(|err| {
            match err.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature
                }
                ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => {
                    AuthError::ExpiredToken
                }
                _ => AuthError::MalformedToken,
            }
        })?;

        data.claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AuthError::InvalidSubject)
    }
}
