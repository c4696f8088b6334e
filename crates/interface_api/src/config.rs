//! API configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Placeholder secret used when `API_JWT_SECRET` is unset
pub const PLACEHOLDER_JWT_SECRET: &str = "change-me-in-production";

/// API configuration
///
/// Read from `API_*` environment variables; any variable left unset keeps
/// its default. A variable that is set but cannot be parsed is an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Secret used to verify bearer tokens
    pub jwt_secret: String,
    /// Lifetime of tokens issued by [`crate::auth::create_token`]
    pub jwt_expiration_secs: u64,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Comma-separated allowed origins, or `*`
    pub cors_origins: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: PLACEHOLDER_JWT_SECRET.to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/claims".to_string(),
            log_level: "info".to_string(),
            cors_origins: "*".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("API").try_parsing(true))
    }

    /// Loads configuration from an `API_*` environment source
    pub fn from_environment(env: Environment) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize()?;

        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("API_JWT_SECRET must not be empty".to_string()));
        }
        Ok(config)
    }

    /// True while tokens are verified with the built-in placeholder secret
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret == PLACEHOLDER_JWT_SECRET
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Explicit origins, or `None` when any origin is allowed
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_environment(
            Environment::with_prefix("API").try_parsing(true).source(Some(vars)),
        )
    }

    #[test]
    fn test_unset_variables_keep_defaults() {
        let config = load(&[("API_JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.port, 8080);
        assert!(!config.uses_placeholder_secret());

        assert!(load(&[]).unwrap().uses_placeholder_secret());
    }

    #[test]
    fn test_bad_value_is_an_error_not_a_default() {
        let result = load(&[
            ("API_JWT_SECRET", "real-production-secret"),
            ("API_PORT", "eighty"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert!(load(&[("API_JWT_SECRET", "  ")]).is_err());
    }

    #[test]
    fn test_server_addr() {
        let config = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            ..Default::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn test_allowed_origins() {
        let mut config = ApiConfig::default();
        assert_eq!(config.allowed_origins(), None);

        config.cors_origins = "https://claims.example.com, https://admin.example.com".to_string();
        assert_eq!(
            config.allowed_origins(),
            Some(vec![
                "https://claims.example.com".to_string(),
                "https://admin.example.com".to_string(),
            ])
        );
    }
}
