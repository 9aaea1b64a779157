use std::env;

use auth::AuthSettings;
use auth::HashingSettings;
use auth::TokenSettings;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: TokenSettings,
    #[serde(default)]
    pub password: HashingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Path prefix all API routes are mounted under
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

/// Environment overrides, e.g. `JWT__SECRET=...` sets `jwt.secret`.
fn environment() -> Environment {
    Environment::default().separator("__")
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment())
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Settings handed to the authentication core.
    pub fn auth_settings(&self) -> AuthSettings {
        AuthSettings {
            jwt: self.jwt.clone(),
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    #[test]
    fn test_defaults_fill_optional_fields() {
        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgresql://localhost/blog"

                [server]
                http_port = 8000

                [jwt]
                secret = "dev-secret"
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.api_prefix, "/api/v1");
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.jwt.access_token_expire_minutes, 60 * 24 * 7);
        assert_eq!(config.password, HashingSettings::default());
    }

    #[test]
    fn test_environment_overrides_files() {
        env::set_var("JWT__SECRET", "secret-from-env");
        env::set_var("DATABASE__URL", "postgresql://env-host/blog");

        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgresql://localhost/blog"

                [server]
                http_port = 8000
                "#,
                FileFormat::Toml,
            ))
            .add_source(environment())
            .build()
            .unwrap();

        let config: Config = configuration.try_deserialize().unwrap();

        assert_eq!(config.jwt.secret, "secret-from-env");
        assert_eq!(config.database.url, "postgresql://env-host/blog");
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        let configuration = ConfigBuilder::builder()
            .add_source(File::from_str(
                r#"
                [database]
                url = "postgresql://localhost/blog"

                [server]
                http_port = 8000
                "#,
                FileFormat::Toml,
            ))
            .build()
            .unwrap();

        assert!(configuration.try_deserialize::<Config>().is_err());
    }
}
