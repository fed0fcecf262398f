//! HS256 session tokens.
//!
//! Implements both `SessionIssuer` and `SessionValidator` with a shared
//! secret. Claims carry the login as `sub` and are checked for issuer,
//! audience and expiry on every request.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Login, Timestamp};
use crate::ports::{SessionIssuer, SessionValidator};

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iss: String,
    aud: String,
    exp: i64,
    iat: i64,
}

/// Settings for `JwtSessions`.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub issuer: String,
    pub audience: String,
    pub ttl_secs: u64,
}

pub struct JwtSessions {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    settings: JwtSettings,
}

impl JwtSessions {
    pub fn new(secret: &[u8], settings: JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            settings,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.settings.issuer]);
        validation.set_audience(&[&self.settings.audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.leeway = 0;
        validation
    }
}

impl SessionIssuer for JwtSessions {
    fn issue(&self, login: &Login) -> Result<String, AuthError> {
        let now = Timestamp::now();
        let ttl = i64::try_from(self.settings.ttl_secs)
            .map_err(|_| AuthError::IssuanceFailed("session TTL out of range".to_string()))?;
        let claims = SessionClaims {
            sub: login.to_string(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            exp: now.plus_secs(ttl).unix_secs(),
            iat: now.unix_secs(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssuanceFailed(e.to_string()))
    }
}

#[async_trait]
impl SessionValidator for JwtSessions {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!(error = %e, "Token validation failed");
                        AuthError::InvalidToken
                    }
                }
            })?;

        let login = Login::new(data.claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser::new(login))
    }
}
