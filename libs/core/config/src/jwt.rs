use crate::{env_or_default, env_required, ConfigError, FromEnv};

/// JWT token signing configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - must be at least 32 characters
/// - `JWT_EXPIRES_IN` - token lifetime in seconds (default: 300)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Access token lifetime in seconds
    pub expires_in_secs: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and the default lifetime.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            expires_in_secs: 300,
        }
    }

    pub fn with_expiry(mut self, expires_in_secs: u64) -> Self {
        self.expires_in_secs = expires_in_secs;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let expires_in_secs = env_or_default("JWT_EXPIRES_IN", "300").parse().map_err(
            |e| ConfigError::ParseError {
                key: "JWT_EXPIRES_IN".to_string(),
                details: format!("{}", e),
            },
        )?;

        Ok(Self {
            secret,
            expires_in_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SECRET: &str = "this-is-a-valid-secret-with-32-chars!";

    #[test]
    fn test_jwt_config_new_valid() {
        let config = JwtConfig::new(VALID_SECRET);
        assert_eq!(config.secret, VALID_SECRET);
        assert_eq!(config.expires_in_secs, 300);
    }

    #[test]
    #[should_panic(expected = "JWT secret must be at least 32 characters")]
    fn test_jwt_config_new_too_short() {
        JwtConfig::new("short");
    }

    #[test]
    fn test_jwt_config_with_expiry() {
        let config = JwtConfig::new(VALID_SECRET).with_expiry(3600);
        assert_eq!(config.expires_in_secs, 3600);
    }

    #[test]
    fn test_jwt_config_from_env() {
        temp_env::with_vars(
            [
                ("JWT_SECRET", Some(VALID_SECRET)),
                ("JWT_EXPIRES_IN", Some("900")),
            ],
            || {
                let config = JwtConfig::from_env().unwrap();
                assert_eq!(config.secret, VALID_SECRET);
                assert_eq!(config.expires_in_secs, 900);
            },
        );
    }

    #[test]
    fn test_jwt_config_from_env_missing_secret() {
        temp_env::with_var_unset("JWT_SECRET", || {
            assert!(JwtConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_jwt_config_from_env_short_secret() {
        temp_env::with_var("JWT_SECRET", Some("too-short"), || {
            let result = JwtConfig::from_env();
            assert!(matches!(
                result,
                Err(ConfigError::ParseError { ref key, .. }) if key == "JWT_SECRET"
            ));
        });
    }
}
