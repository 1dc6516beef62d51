use std::env;
use std::str::FromStr;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Required; startup fails fast when absent.
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Signing secret. Required; startup fails fast when absent.
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl JwtConfig {
    /// Parse the configured signing algorithm identifier.
    pub fn algorithm(&self) -> Result<Algorithm, ConfigError> {
        Algorithm::from_str(&self.algorithm).map_err(|e| {
            ConfigError::Message(format!(
                "Unsupported signing algorithm '{}': {}",
                self.algorithm, e
            ))
        })
    }
}

fn default_http_port() -> u16 {
    8000
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    30
}

impl Settings {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// Immutable after load; fails if the database URL or signing secret
    /// is missing.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_http_port(), 8000);
        assert_eq!(default_algorithm(), "HS256");
        assert_eq!(default_expiration_minutes(), 30);
    }

    #[test]
    fn test_algorithm_parses() {
        let jwt = JwtConfig {
            secret: "secret".to_string(),
            algorithm: "HS256".to_string(),
            expiration_minutes: 30,
        };
        assert_eq!(jwt.algorithm().unwrap(), Algorithm::HS256);
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let jwt = JwtConfig {
            secret: "secret".to_string(),
            algorithm: "ROT13".to_string(),
            expiration_minutes: 30,
        };
        assert!(jwt.algorithm().is_err());
    }
}
