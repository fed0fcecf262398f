//! Session token configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Shortest accepted HS256 secret.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Session token configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    pub jwt_secret: Secret<String>,

    /// `iss` claim
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Session lifetime, also used as the cookie Max-Age
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN));
        }
        if self.session_ttl_secs == 0 {
            return Err(ValidationError::InvalidSessionTtl);
        }
        Ok(())
    }
}

fn default_issuer() -> String {
    "money-manage".to_string()
}

fn default_audience() -> String {
    "money-manage-web".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            issuer: default_issuer(),
            audience: default_audience(),
            session_ttl_secs: default_session_ttl(),
        }
    }

    #[test]
    fn test_valid_secret_passes() {
        assert!(config(&"x".repeat(MIN_JWT_SECRET_LEN)).validate().is_ok());
    }

    #[test]
    fn test_short_secret_is_rejected() {
        assert_eq!(
            config("short").validate(),
            Err(ValidationError::JwtSecretTooShort(MIN_JWT_SECRET_LEN))
        );
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = config(&"x".repeat(MIN_JWT_SECRET_LEN));
        config.session_ttl_secs = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidSessionTtl));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", config("super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }
}
