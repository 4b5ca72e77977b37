use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Secrets shorter than this are accepted with a warning.
const RECOMMENDED_SECRET_BYTES: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout_seconds() -> u64 {
    5
}

fn default_http_port() -> u16 {
    3000
}

fn default_expiration_hours() -> i64 {
    1
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
        }
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl JwtConfig {
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.expiration_hours)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        Self::from_configuration(configuration)
    }

    /// Deserialize and validate an already assembled configuration.
    pub fn from_configuration(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must be set before any token can be issued".to_string(),
            ));
        }
        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_hours must be positive, got {}",
                self.jwt.expiration_hours
            )));
        }
        if self.database.url.is_empty() {
            return Err(ConfigError::Message("database.url must be set".to_string()));
        }
        if self.jwt.secret.len() < RECOMMENDED_SECRET_BYTES {
            tracing::warn!(
                secret_bytes = self.jwt.secret.len(),
                recommended = RECOMMENDED_SECRET_BYTES,
                "JWT secret is shorter than recommended for HS256"
            );
        }

        Ok(())
    }
}
